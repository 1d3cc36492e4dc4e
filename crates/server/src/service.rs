//! # Movie Service
//!
//! Stateless fetch-then-enrich pipeline:
//! 1. Resolve the browse mode from the search term
//! 2. Fetch the raw listing (popular, search, or recommendations)
//! 3. Enrich every movie with its director and lead actor
//!
//! Nothing here holds view state; `MovieBrowser` layers navigation and
//! request supersession on top, and the CLI calls it directly for one-shot
//! commands.

use std::sync::Arc;
use std::time::Instant;

use catalog::{BrowseMode, CatalogFetcher, Result};
use enrichment::EnrichmentAggregator;
use movie_data::{EnrichedMovie, MovieId};
use tmdb_client::{MovieApi, TmdbClient, TmdbConfig, TmdbError};
use tracing::info;

/// Fetches and enriches movie lists
#[derive(Clone)]
pub struct MovieService {
    fetcher: CatalogFetcher,
    aggregator: EnrichmentAggregator,
}

impl MovieService {
    /// Build the pipeline over any upstream implementation
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self {
            fetcher: CatalogFetcher::new(api.clone()),
            aggregator: EnrichmentAggregator::new(api),
        }
    }

    /// Build the pipeline over the real HTTP client
    pub fn from_config(config: TmdbConfig) -> std::result::Result<Self, TmdbError> {
        let client = TmdbClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Popular movies for an empty/whitespace term, search results otherwise
    pub async fn catalog(&self, term: &str) -> Result<Vec<EnrichedMovie>> {
        let start_time = Instant::now();

        let mode = BrowseMode::from_term(term);
        let raw = self.fetcher.fetch(&mode).await?;
        info!("Fetched {} movies for {:?}", raw.len(), mode);

        let movies = self.aggregator.enrich_all(raw).await?;
        info!(
            "Catalog ready: {} movies in {:.2?}",
            movies.len(),
            start_time.elapsed()
        );
        Ok(movies)
    }

    /// Enriched recommendations for one movie
    pub async fn recommendations(&self, movie_id: MovieId) -> Result<Vec<EnrichedMovie>> {
        let start_time = Instant::now();

        let raw = self.fetcher.fetch_recommendations(movie_id).await?;
        info!("Fetched {} recommendations for movie {}", raw.len(), movie_id);

        let movies = self.aggregator.enrich_all(raw).await?;
        info!(
            "Recommendations for movie {} ready: {} movies in {:.2?}",
            movie_id,
            movies.len(),
            start_time.elapsed()
        );
        Ok(movies)
    }
}
