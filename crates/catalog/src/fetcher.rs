//! CatalogFetcher - raw movie listings
//!
//! Resolves a browse request into an ordered list of [`MovieSummary`]:
//! - Popular: discover endpoint sorted by descending popularity
//! - Search: title search, in upstream relevance order
//! - Recommendations: per-movie recommendation listing
//!
//! Results are returned exactly as upstream ordered them. Nothing here
//! touches shared state; the caller decides what to do with the data.

use std::fmt;
use std::sync::Arc;

use movie_data::{MovieId, MovieSummary};
use tmdb_client::MovieApi;
use tracing::{debug, instrument, warn};

use crate::error::{BrowseError, Listing, Result};

/// A search term that is known to be non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Returns `None` for empty or whitespace-only input
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which listing a browse request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    Popular,
    Search(SearchTerm),
}

impl BrowseMode {
    /// Empty or whitespace-only terms browse popular movies; anything else
    /// searches for the trimmed term.
    pub fn from_term(raw: &str) -> Self {
        match SearchTerm::new(raw) {
            Some(term) => BrowseMode::Search(term),
            None => BrowseMode::Popular,
        }
    }

    fn listing(&self) -> Listing {
        match self {
            BrowseMode::Popular => Listing::Popular,
            BrowseMode::Search(term) => Listing::Search(term.to_string()),
        }
    }
}

/// Fetches raw listings from upstream
#[derive(Clone)]
pub struct CatalogFetcher {
    api: Arc<dyn MovieApi>,
}

impl CatalogFetcher {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        Self { api }
    }

    /// Popular movies, most popular first
    #[instrument(skip(self))]
    pub async fn fetch_popular(&self) -> Result<Vec<MovieSummary>> {
        let movies = self
            .api
            .discover_popular()
            .await
            .map_err(|source| Self::failed(Listing::Popular, source))?;
        debug!("Fetched {} popular movies", movies.len());
        Ok(movies)
    }

    /// Title search results in relevance order. Zero matches is an empty
    /// list, not an error.
    #[instrument(skip(self, term), fields(term = %term))]
    pub async fn fetch_by_search(&self, term: &SearchTerm) -> Result<Vec<MovieSummary>> {
        let movies = self
            .api
            .search_movies(term.as_str())
            .await
            .map_err(|source| Self::failed(Listing::Search(term.to_string()), source))?;
        debug!("Search for '{}' returned {} movies", term, movies.len());
        Ok(movies)
    }

    /// Dispatch on the browse mode
    pub async fn fetch(&self, mode: &BrowseMode) -> Result<Vec<MovieSummary>> {
        debug!("Browsing {}", mode.listing());
        match mode {
            BrowseMode::Popular => self.fetch_popular().await,
            BrowseMode::Search(term) => self.fetch_by_search(term).await,
        }
    }

    /// Recommendations for one movie, in upstream order
    #[instrument(skip(self))]
    pub async fn fetch_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>> {
        let movies = self
            .api
            .movie_recommendations(movie_id)
            .await
            .map_err(|source| Self::failed(Listing::Recommendations(movie_id), source))?;
        debug!("Fetched {} recommendations for movie {}", movies.len(), movie_id);
        Ok(movies)
    }

    fn failed(listing: Listing, source: tmdb_client::TmdbError) -> BrowseError {
        warn!("Listing fetch failed for {}: {}", listing, source);
        BrowseError::listing_failed(listing, source)
    }
}
