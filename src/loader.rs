use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Book, Rating, User};

/// The three typed tables the pipeline mines from
#[derive(Debug, Clone)]
pub struct Tables {
    pub ratings: Vec<Rating>,
    pub books: Vec<Book>,
    pub users: Vec<User>,
}

/// Loads the ratings, books and user_info tables from CSV resources.
///
/// Any missing, unreadable, or unparseable resource fails the whole load
/// with [`AppError::DataUnavailable`]; there is no partial result. Rows are
/// not cross-checked against each other here; a rating referencing an
/// unknown book simply never resolves at query time.
pub fn load_tables(
    ratings_path: &Path,
    books_path: &Path,
    user_info_path: &Path,
) -> AppResult<Tables> {
    let ratings: Vec<Rating> = read_table(ratings_path)?;
    let books: Vec<Book> = read_table(books_path)?;
    let users: Vec<User> = read_table(user_info_path)?;

    info!(
        ratings = ratings.len(),
        books = books.len(),
        users = users.len(),
        "Loaded input tables"
    );

    Ok(Tables {
        ratings,
        books,
        users,
    })
}

/// Reads one CSV resource (header row required) into typed records.
///
/// Columns not named by the target record are ignored, which is how the
/// user_info table's opaque metadata columns are dropped.
fn read_table<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let unavailable = |source: csv::Error| AppError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(unavailable)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(unavailable)
}
