pub mod binarizer;
pub mod miner;
pub mod recommender;
pub mod rules;

use serde::Serialize;
use tracing::info;

use crate::loader::Tables;
use crate::models::Catalog;

pub use binarizer::{binarize, IncidenceMatrix, DEFAULT_ENDORSEMENT_THRESHOLD};
pub use miner::{mine, ItemSet};
pub use recommender::{Recommendation, Recommender};
pub use rules::{generate_rules, Rule};

/// Thresholds for one mining run
#[derive(Debug, Clone, Copy)]
pub struct MiningOptions {
    pub min_support: f64,
    pub min_confidence: f64,
    pub endorsement_threshold: u8,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            min_support: 0.05,
            min_confidence: 0.6,
            endorsement_threshold: DEFAULT_ENDORSEMENT_THRESHOLD,
        }
    }
}

/// Counts from one pipeline run, for logging and diagnostics
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PipelineSummary {
    pub ratings: usize,
    pub books: usize,
    pub users: usize,
    pub itemsets: usize,
    pub rules: usize,
}

/// Runs the full batch pipeline: binarize -> mine -> generate rules.
///
/// Each stage consumes the previous stage's output and nothing is mutated
/// afterward. Sparse or over-thresholded input flows through as empty
/// collections; the only failure mode lives upstream in the loader.
pub fn build_recommender(tables: Tables, options: &MiningOptions) -> (Recommender, PipelineSummary) {
    let matrix = binarize(&tables.ratings, options.endorsement_threshold);
    let itemsets = mine(&matrix, options.min_support);
    let rules = generate_rules(&itemsets, options.min_confidence);

    let summary = PipelineSummary {
        ratings: tables.ratings.len(),
        books: tables.books.len(),
        users: tables.users.len(),
        itemsets: itemsets.len(),
        rules: rules.len(),
    };
    info!(
        ratings = summary.ratings,
        books = summary.books,
        users = summary.users,
        itemsets = summary.itemsets,
        rules = summary.rules,
        "Pipeline finished"
    );

    let catalog = Catalog::new(tables.books);
    (Recommender::new(catalog, rules), summary)
}
