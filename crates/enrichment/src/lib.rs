//! Enrichment of raw movie listings with credits.
//!
//! This crate provides:
//! - Director / lead-actor extraction from a credits payload
//! - `EnrichmentAggregator`, the concurrent all-or-nothing credits fan-out
//!
//! ## Architecture
//! The same aggregation run is used for every list the browser shows:
//! 1. CatalogFetcher (or the recommendation lookup) returns raw summaries
//! 2. EnrichmentAggregator looks up credits for each one concurrently
//! 3. The enriched list, in input order, becomes the visible grid
//!
//! ## Example Usage
//! ```ignore
//! use enrichment::EnrichmentAggregator;
//!
//! let aggregator = EnrichmentAggregator::new(api.clone());
//! let movies = aggregator.enrich_all(fetcher.fetch_popular().await?).await?;
//! ```

pub mod extract;
pub mod aggregator;

// Re-export main types
pub use aggregator::EnrichmentAggregator;
pub use extract::{enrich, find_director, find_lead_actor, DIRECTOR_JOB};
