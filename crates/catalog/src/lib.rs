//! # Catalog Crate
//!
//! Turns a browse request into a list of raw movie summaries.
//!
//! ## Components
//!
//! ### CatalogFetcher
//! - Popular listing when the search term is empty or whitespace
//! - Title search otherwise
//! - Per-movie recommendation listing
//!
//! ### BrowseError
//! The error taxonomy shared with the enrichment layer: a listing failed, or
//! a credit lookup inside an aggregation run failed.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{BrowseMode, CatalogFetcher};
//! use std::sync::Arc;
//! use tmdb_client::{TmdbClient, TmdbConfig};
//!
//! let client = TmdbClient::new(TmdbConfig::from_env())?;
//! let fetcher = CatalogFetcher::new(Arc::new(client));
//!
//! let movies = fetcher.fetch(&BrowseMode::from_term("Alien")).await?;
//! ```

// Public modules
pub mod error;
pub mod fetcher;

// Re-export commonly used types
pub use error::{BrowseError, Listing, Result};
pub use fetcher::{BrowseMode, CatalogFetcher, SearchTerm};
