use anyhow::Context;
use tracing::{info, warn};

use bibliorec::config::Config;
use bibliorec::loader::load_tables;
use bibliorec::services::{build_recommender, MiningOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bibliorec=info")),
        )
        .init();

    let config = Config::from_env()?;
    config.validate().context("invalid configuration")?;

    let tables = load_tables(&config.ratings_path, &config.books_path, &config.user_info_path)
        .context("failed to load input tables")?;

    let options = MiningOptions {
        min_support: config.min_support,
        min_confidence: config.min_confidence,
        endorsement_threshold: config.endorsement_threshold,
    };
    let (recommender, summary) = build_recommender(tables, &options);
    println!("{}", serde_json::to_string(&summary)?);

    // Demo query: the configured title, or the first catalog entry.
    let query_title = match config.query_title {
        Some(title) => title,
        None => match recommender.catalog().first_title() {
            Some(title) => title.to_string(),
            None => {
                warn!("Catalog is empty; nothing to query");
                return Ok(());
            }
        },
    };

    info!(title = %query_title, top_n = config.top_n, "Querying recommendations");
    let recommendations = recommender.recommend(&query_title, config.top_n);
    if recommendations.is_empty() {
        info!(title = %query_title, "No recommendations available");
    }
    for recommendation in &recommendations {
        println!("{}", serde_json::to_string(recommendation)?);
    }

    Ok(())
}
