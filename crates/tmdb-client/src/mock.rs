//! In-memory [`MovieApi`] for tests.
//!
//! Responses are registered up front with the `with_*` builders. Any call can
//! be gated on a [`Notify`] to hold its response until the test releases it,
//! which is how tests drive overlapping requests deterministically.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use movie_data::{Credits, MovieId, MovieSummary};
use reqwest::StatusCode;
use tokio::sync::Notify;

use crate::error::{Result, TmdbError};
use crate::request::Endpoint;
use crate::MovieApi;

/// One call made against the mock, in arrival order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordedCall {
    Popular,
    Search(String),
    Credits(MovieId),
    Recommendations(MovieId),
}

impl RecordedCall {
    fn endpoint(&self) -> Endpoint {
        match self {
            RecordedCall::Popular => Endpoint::DiscoverMovies,
            RecordedCall::Search(_) => Endpoint::SearchMovies,
            RecordedCall::Credits(id) => Endpoint::MovieCredits(*id),
            RecordedCall::Recommendations(id) => Endpoint::MovieRecommendations(*id),
        }
    }
}

#[derive(Default)]
struct MockState {
    popular: Vec<MovieSummary>,
    searches: HashMap<String, Vec<MovieSummary>>,
    credits: HashMap<MovieId, Credits>,
    recommendations: HashMap<MovieId, Vec<MovieSummary>>,
    failing: HashSet<RecordedCall>,
    gates: HashMap<RecordedCall, Arc<Notify>>,
    calls: Vec<RecordedCall>,
}

/// Scriptable stand-in for the upstream API.
///
/// Unknown searches and recommendation ids return empty listings. Unknown
/// credit ids fail with 404, matching upstream behaviour for missing movies.
#[derive(Clone, Default)]
pub struct MockMovieApi {
    state: Arc<Mutex<MockState>>,
}

impl MockMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    pub fn with_popular(self, movies: Vec<MovieSummary>) -> Self {
        self.lock().popular = movies;
        self
    }

    pub fn with_search(self, term: impl Into<String>, movies: Vec<MovieSummary>) -> Self {
        self.lock().searches.insert(term.into(), movies);
        self
    }

    pub fn with_credits(self, movie_id: MovieId, credits: Credits) -> Self {
        self.lock().credits.insert(movie_id, credits);
        self
    }

    pub fn with_recommendations(self, movie_id: MovieId, movies: Vec<MovieSummary>) -> Self {
        self.lock().recommendations.insert(movie_id, movies);
        self
    }

    /// Make `call` fail with HTTP 500
    pub fn failing(self, call: RecordedCall) -> Self {
        self.lock().failing.insert(call);
        self
    }

    /// Hold `call` until the returned handle is notified
    pub fn gate(&self, call: RecordedCall) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.lock().gates.insert(call, notify.clone());
        notify
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    async fn enter(&self, call: RecordedCall) -> Result<()> {
        let (gate, fails) = {
            let mut state = self.lock();
            state.calls.push(call.clone());
            (state.gates.get(&call).cloned(), state.failing.contains(&call))
        };

        if let Some(gate) = gate {
            gate.notified().await;
        }

        if fails {
            return Err(TmdbError::Status {
                endpoint: call.endpoint(),
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MovieApi for MockMovieApi {
    async fn discover_popular(&self) -> Result<Vec<MovieSummary>> {
        self.enter(RecordedCall::Popular).await?;
        Ok(self.lock().popular.clone())
    }

    async fn search_movies(&self, term: &str) -> Result<Vec<MovieSummary>> {
        self.enter(RecordedCall::Search(term.to_string())).await?;
        Ok(self.lock().searches.get(term).cloned().unwrap_or_default())
    }

    async fn movie_credits(&self, movie_id: MovieId) -> Result<Credits> {
        self.enter(RecordedCall::Credits(movie_id)).await?;
        self.lock()
            .credits
            .get(&movie_id)
            .cloned()
            .ok_or(TmdbError::Status {
                endpoint: Endpoint::MovieCredits(movie_id),
                status: StatusCode::NOT_FOUND,
            })
    }

    async fn movie_recommendations(&self, movie_id: MovieId) -> Result<Vec<MovieSummary>> {
        self.enter(RecordedCall::Recommendations(movie_id)).await?;
        Ok(self
            .lock()
            .recommendations
            .get(&movie_id)
            .cloned()
            .unwrap_or_default())
    }
}
