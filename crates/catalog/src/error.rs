//! Error types for browse and enrichment operations.
//!
//! Only two kinds of failure exist above the transport layer: a listing could
//! not be fetched, or one of the credit lookups in an aggregation run failed.
//! The upstream cause is kept as the error source for logs; callers show a
//! generic message.

use std::fmt;

use movie_data::MovieId;
use thiserror::Error;
use tmdb_client::TmdbError;

/// Which listing a [`BrowseError::CatalogFetchFailed`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Popular,
    Search(String),
    Recommendations(MovieId),
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Popular => write!(f, "popular movies"),
            Listing::Search(term) => write!(f, "search results for '{term}'"),
            Listing::Recommendations(id) => write!(f, "recommendations for movie {id}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BrowseError {
    /// Popular, search, or recommendation listing failed
    #[error("Failed to fetch {listing}")]
    CatalogFetchFailed {
        listing: Listing,
        #[source]
        source: TmdbError,
    },

    /// A credit lookup failed, so the whole aggregation run was discarded
    #[error("Failed to fetch credits for movie {movie_id}")]
    EnrichmentFailed {
        movie_id: MovieId,
        #[source]
        source: TmdbError,
    },
}

impl BrowseError {
    pub fn listing_failed(listing: Listing, source: TmdbError) -> Self {
        BrowseError::CatalogFetchFailed { listing, source }
    }

    pub fn enrichment_failed(movie_id: MovieId, source: TmdbError) -> Self {
        BrowseError::EnrichmentFailed { movie_id, source }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, BrowseError>;
