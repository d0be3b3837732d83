use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the ratings table (user_id, book_id, rating)
    #[serde(default = "default_ratings_path")]
    pub ratings_path: PathBuf,

    /// Path to the books table (id, title, optional author)
    #[serde(default = "default_books_path")]
    pub books_path: PathBuf,

    /// Path to the user info table (user_id plus opaque metadata)
    #[serde(default = "default_user_info_path")]
    pub user_info_path: PathBuf,

    /// Minimum fraction of users endorsing an itemset for it to be frequent
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Minimum confidence for a rule to be kept
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Number of recommendations returned per query
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Rating at or above which a rating counts as a positive endorsement
    #[serde(default = "default_endorsement_threshold")]
    pub endorsement_threshold: u8,

    /// Title to query in the demo binary; defaults to the first catalog entry
    #[serde(default)]
    pub query_title: Option<String>,
}

fn default_ratings_path() -> PathBuf {
    PathBuf::from("database/ratings.csv")
}

fn default_books_path() -> PathBuf {
    PathBuf::from("database/books.csv")
}

fn default_user_info_path() -> PathBuf {
    PathBuf::from("database/user_info.csv")
}

fn default_min_support() -> f64 {
    0.05
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_top_n() -> usize {
    3
}

fn default_endorsement_threshold() -> u8 {
    4
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Reject thresholds outside their meaningful ranges.
    ///
    /// The mining code itself tolerates extreme values (an impossible
    /// min_support just yields an empty result); this check exists so the
    /// CLI fails fast on a typo instead of silently recommending nothing.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(AppError::InvalidInput(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )));
        }
        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return Err(AppError::InvalidInput(format!(
                "min_confidence must be in (0, 1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}
