//! reqwest-backed implementation of [`MovieApi`].

use std::sync::Arc;

use async_trait::async_trait;
use movie_data::{Credits, MovieId, MoviePage, MovieSummary};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::TmdbConfig;
use crate::error::{Result, TmdbError};
use crate::request::TmdbRequest;
use crate::MovieApi;

/// HTTP client for the movie database.
///
/// Cheap to clone: the connection pool and configuration are shared.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    config: Arc<TmdbConfig>,
}

impl TmdbClient {
    /// Build a client with the configured request timeout
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TmdbError::Client)?;

        debug!(base_url = config.base_url(), language = config.language(), "Created TMDB client");
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    /// Send one GET request and decode its JSON body.
    ///
    /// Any non-2xx status is an error; the body of a failed response is not read.
    #[instrument(skip(self, request), fields(endpoint = %request.endpoint()))]
    pub async fn send<T: DeserializeOwned>(&self, request: &TmdbRequest) -> Result<T> {
        let endpoint = request.endpoint();
        let url = request.url(&self.config)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| TmdbError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Upstream request failed");
            return Err(TmdbError::Status { endpoint, status });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| TmdbError::Decode { endpoint, source })
    }

    async fn send_listing(&self, request: TmdbRequest) -> Result<Vec<MovieSummary>> {
        let page: MoviePage = self.send(&request).await?;
        debug!(endpoint = %request.endpoint(), count = page.results.len(), "Fetched listing");
        Ok(page.results)
    }
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn discover_popular(&self) -> Result<Vec<MovieSummary>> {
        self.send_listing(TmdbRequest::discover_popular()).await
    }

    async fn search_movies(&self, term: &str) -> Result<Vec<MovieSummary>> {
        self.send_listing(TmdbRequest::search(term)).await
    }

    async fn movie_credits(&self, movie_id: MovieId) -> Result<Credits> {
        self.send(&TmdbRequest::credits(movie_id)).await
    }

    async fn movie_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>> {
        self.send_listing(TmdbRequest::recommendations(movie_id)).await
    }
}
