//! EnrichmentAggregator - credits fan-out and merge
//!
//! ## Algorithm
//! 1. For each summary, start one credits lookup (all concurrently)
//! 2. Wait for every lookup to finish
//! 3. Merge director/lead actor into each summary, keeping input order
//!
//! ## All-or-nothing
//! One failed lookup fails the whole run. Results already obtained for other
//! movies are dropped and the remaining lookups are abandoned; the caller
//! gets a single [`BrowseError::EnrichmentFailed`] and keeps whatever state
//! it had before.

use std::sync::Arc;
use std::time::Instant;

use catalog::{BrowseError, Result};
use futures::future::try_join_all;
use movie_data::{EnrichedMovie, MovieSummary};
use tmdb_client::MovieApi;
use tracing::{debug, instrument, warn};

use crate::extract::enrich;

/// Enriches movie lists with per-movie credits
#[derive(Clone)]
pub struct EnrichmentAggregator {
    api: Arc<dyn MovieApi>,
}

impl EnrichmentAggregator {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    /// Enrich every summary, or fail as a whole.
    ///
    /// Output is index-aligned with the input regardless of the order in
    /// which lookups complete. An empty input makes no upstream calls.
    #[instrument(skip(self, movies), fields(count = movies.len()))]
    pub async fn enrich_all(&self, movies: Vec<MovieSummary>) -> Result<Vec<EnrichedMovie>> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let count = movies.len();

        let lookups = movies.into_iter().map(|summary| {
            let api = self.api.clone();
            async move {
                let movie_id = summary.id;
                match api.movie_credits(movie_id).await {
                    Ok(credits) => Ok(enrich(summary, &credits)),
                    Err(source) => {
                        warn!("Credits lookup failed for movie {}: {}", movie_id, source);
                        Err(BrowseError::enrichment_failed(movie_id, source))
                    }
                }
            }
        });

        // try_join_all yields results in input order and short-circuits on
        // the first error
        let enriched = try_join_all(lookups).await?;

        debug!("Enriched {} movies in {:.2?}", count, start.elapsed());
        Ok(enriched)
    }
}
