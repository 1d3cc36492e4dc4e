//! Client for the upstream movie database (TMDB v3).
//!
//! This crate provides:
//! - `TmdbConfig` for the API key, API root, language, and timeout
//! - A typed request builder (`TmdbRequest`) so URLs are never string-built
//! - The `MovieApi` trait, the seam the catalog and enrichment layers call
//! - `TmdbClient`, the reqwest-backed implementation of `MovieApi`
//! - `MockMovieApi` (feature `test-util`), an in-memory double for tests

use async_trait::async_trait;
use movie_data::{Credits, MovieId, MovieSummary};

pub mod client;
pub mod config;
pub mod error;
pub mod request;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::TmdbClient;
pub use config::TmdbConfig;
pub use error::{Result, TmdbError};
pub use request::{Endpoint, QueryParam, SortOrder, TmdbRequest};
pub use reqwest::StatusCode;

#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockMovieApi, RecordedCall};

/// The four upstream lookups the browser is built from.
///
/// Every listing comes back in upstream order; implementations must not sort
/// or filter.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Popular movies, most popular first
    async fn discover_popular(&self) -> Result<Vec<MovieSummary>>;

    /// Title search, in upstream relevance order
    async fn search_movies(&self, term: &str) -> Result<Vec<MovieSummary>>;

    /// Cast and crew for one movie
    async fn movie_credits(&self, movie_id: MovieId) -> Result<Credits>;

    /// Movies recommended for one movie
    async fn movie_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>>;
}
