//! Association-rule recommendation engine for book ratings.
//!
//! Loads flat rating/book/user tables, binarizes ratings into a sparse
//! user-book incidence matrix, mines frequent itemsets with a level-wise
//! Apriori search, expands them into confidence-scored rules, and answers
//! "readers of X also endorsed..." queries against the mined rule set.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod services;
