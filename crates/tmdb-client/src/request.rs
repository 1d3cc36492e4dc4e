//! Typed request builder.
//!
//! Every upstream call is described by an [`Endpoint`] plus a list of
//! declared [`QueryParam`]s. URLs are assembled with `url::Url`, which
//! percent-encodes values, so a search term can never break out of its
//! parameter.

use std::borrow::Cow;
use std::fmt;

use movie_data::MovieId;
use url::Url;

use crate::config::TmdbConfig;
use crate::error::TmdbError;

/// Upstream endpoints the browser consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DiscoverMovies,
    SearchMovies,
    MovieCredits(MovieId),
    MovieRecommendations(MovieId),
}

impl Endpoint {
    /// Path relative to the API root (no leading slash)
    pub fn path(&self) -> String {
        match self {
            Endpoint::DiscoverMovies => "discover/movie".to_string(),
            Endpoint::SearchMovies => "search/movie".to_string(),
            Endpoint::MovieCredits(id) => format!("movie/{id}/credits"),
            Endpoint::MovieRecommendations(id) => format!("movie/{id}/recommendations"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Sort orders accepted by the discover endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PopularityDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PopularityDesc => "popularity.desc",
        }
    }
}

/// Endpoint-specific query parameters. `api_key` and `language` are added to
/// every request by [`TmdbRequest::url`] and are not listed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParam {
    SortBy(SortOrder),
    Query(String),
}

impl QueryParam {
    pub fn key(&self) -> &'static str {
        match self {
            QueryParam::SortBy(_) => "sort_by",
            QueryParam::Query(_) => "query",
        }
    }

    pub fn value(&self) -> Cow<'_, str> {
        match self {
            QueryParam::SortBy(order) => Cow::Borrowed(order.as_str()),
            QueryParam::Query(term) => Cow::Borrowed(term.as_str()),
        }
    }
}

/// A fully described upstream GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbRequest {
    endpoint: Endpoint,
    params: Vec<QueryParam>,
}

impl TmdbRequest {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    /// Add a parameter (builder pattern)
    pub fn param(mut self, param: QueryParam) -> Self {
        self.params.push(param);
        self
    }

    /// `discover/movie?sort_by=popularity.desc`
    pub fn discover_popular() -> Self {
        Self::new(Endpoint::DiscoverMovies).param(QueryParam::SortBy(SortOrder::PopularityDesc))
    }

    /// `search/movie?query=<term>`
    pub fn search(term: impl Into<String>) -> Self {
        Self::new(Endpoint::SearchMovies).param(QueryParam::Query(term.into()))
    }

    /// `movie/{id}/credits`
    pub fn credits(movie_id: MovieId) -> Self {
        Self::new(Endpoint::MovieCredits(movie_id))
    }

    /// `movie/{id}/recommendations`
    pub fn recommendations(movie_id: MovieId) -> Self {
        Self::new(Endpoint::MovieRecommendations(movie_id))
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Resolve against the configured API root.
    ///
    /// The result contains the API key, so log [`Endpoint`] instead of it.
    pub fn url(&self, config: &TmdbConfig) -> Result<Url, TmdbError> {
        let base = Url::parse(config.base_url())?;
        let mut url = base.join(&self.endpoint.path())?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api_key", config.api_key());
            pairs.append_pair("language", config.language());
            for param in &self.params {
                pairs.append_pair(param.key(), &param.value());
            }
        }
        Ok(url)
    }
}
