pub mod book;
pub mod rating;
pub mod user;

pub use book::{Book, Catalog};
pub use rating::Rating;
pub use user::User;
