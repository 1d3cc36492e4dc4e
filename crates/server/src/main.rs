//! Simple test harness for the movie browser.
//!
//! This binary exercises the end-to-end flow against the live API: load the
//! popular catalog, select the first movie, and list its recommendations.

use anyhow::{Context, Result};
use tracing::info;

use server::{MovieBrowser, MovieService};
use tmdb_client::TmdbConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,catalog=debug,enrichment=debug")
        .init();

    info!("Starting movie browser test harness");

    let config = TmdbConfig::from_env();
    info!("Using upstream {:?}", config);
    let service = MovieService::from_config(config).context("Failed to build TMDB client")?;
    let browser = MovieBrowser::new(service);

    info!("Loading popular catalog...");
    let catalog = browser.get_catalog("").await?;
    info!("Received {} movies:", catalog.len());
    for (i, movie) in catalog.iter().enumerate() {
        info!(
            "{}. {} ({}) - Director: {} - Starring: {}",
            i + 1,
            movie.title(),
            movie.summary.release_date().unwrap_or("????"),
            movie.director_name().unwrap_or("N/A"),
            movie.lead_actor_name().unwrap_or("N/A"),
        );
    }

    let Some(first) = catalog.first().cloned() else {
        info!("Catalog is empty, nothing to recommend from");
        return Ok(());
    };

    info!("Fetching recommendations for '{}'", first.title());
    let recommendations = browser.select_movie(first).await?;
    for (i, movie) in recommendations.iter().enumerate() {
        info!(
            "{}. {} - Director: {}",
            i + 1,
            movie.title(),
            movie.director_name().unwrap_or("N/A"),
        );
    }

    Ok(())
}
