//! # Movie Browser
//!
//! The presentation-facing navigation model:
//! - `get_catalog(term)` loads the movie grid (popular or search results)
//! - `select_movie(movie)` switches to that movie's recommendation grid
//! - `back_to_catalog()` returns to the grid already loaded
//! - `return_home()` clears the search and reloads popular movies
//!
//! State is published through a `tokio::sync::watch` channel so a view can
//! observe loading and error changes. Every fetch takes a fresh
//! [`RequestToken`]; when it completes, its result is applied only if that
//! token is still the one the view is waiting on. Anything older is dropped
//! and the caller gets [`ViewError::Superseded`].

use movie_data::EnrichedMovie;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

use crate::service::MovieService;
use crate::state::{
    BrowserState, LoadState, NavigationState, QueryState, RequestToken, Scope, TokenIssuer,
    ViewError, ViewFailure,
};

type Outcome = Result<Vec<EnrichedMovie>, (ViewFailure, catalog::BrowseError)>;

pub struct MovieBrowser {
    service: MovieService,
    tokens: TokenIssuer,
    state: watch::Sender<BrowserState>,
}

impl MovieBrowser {
    pub fn new(service: MovieService) -> Self {
        let (state, _) = watch::channel(BrowserState::default());
        Self {
            service,
            tokens: TokenIssuer::default(),
            state,
        }
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    pub fn query(&self) -> QueryState {
        self.state.borrow().query()
    }

    /// The search box is only offered while browsing the catalog
    pub fn can_search(&self) -> bool {
        self.state.borrow().navigation().is_browsing()
    }

    /// Load the catalog for `term` (popular movies when blank).
    ///
    /// On failure the previous catalog is kept and the view shows the error.
    #[instrument(skip(self))]
    pub async fn get_catalog(&self, term: &str) -> Result<Vec<EnrichedMovie>, ViewError> {
        let token = self.tokens.next();
        self.state.send_modify(|state| {
            state.search_term = term.to_string();
            state.catalog.begin(token);
        });
        debug!("Catalog request {} started", token);

        let outcome = Self::outcome(Scope::Catalog, self.service.catalog(term).await);

        let applied = self.state.send_if_modified(|state| {
            if !state.catalog.is_current(token) {
                return false;
            }
            state.catalog.finish(Self::for_state(&outcome));
            true
        });

        Self::settle(token, applied, outcome)
    }

    /// Show recommendations for `movie`.
    ///
    /// The prior recommendation list is discarded immediately. If the fetch
    /// fails, navigation stays on `movie` with an empty list and an error.
    #[instrument(skip(self, movie), fields(movie_id = movie.id()))]
    pub async fn select_movie(&self, movie: EnrichedMovie) -> Result<Vec<EnrichedMovie>, ViewError> {
        let token = self.tokens.next();
        let movie_id = movie.id();
        info!("Selected '{}' ({})", movie.title(), movie_id);

        self.state.send_modify(|state| {
            let mut recommendations = LoadState::Idle;
            recommendations.begin(token);
            state.navigation = NavigationState::Viewing {
                selected: movie,
                recommendations,
            };
        });

        let outcome = Self::outcome(
            Scope::Recommendations,
            self.service.recommendations(movie_id).await,
        );

        let applied = self.state.send_if_modified(|state| match &mut state.navigation {
            NavigationState::Viewing {
                selected,
                recommendations,
            } if selected.id() == movie_id && recommendations.is_current(token) => {
                recommendations.finish(Self::for_state(&outcome));
                true
            }
            _ => false,
        });

        Self::settle(token, applied, outcome)
    }

    /// Go back to the catalog grid without refetching it
    pub fn back_to_catalog(&self) -> Vec<EnrichedMovie> {
        let mut catalog = Vec::new();
        self.state.send_modify(|state| {
            state.navigation = NavigationState::Browsing;
            catalog = state.catalog.data().cloned().unwrap_or_default();
        });
        catalog
    }

    /// Leave any selection, clear the search term, and reload popular movies
    pub async fn return_home(&self) -> Result<Vec<EnrichedMovie>, ViewError> {
        self.state.send_modify(|state| {
            state.navigation = NavigationState::Browsing;
            state.search_term.clear();
        });
        self.get_catalog("").await
    }

    fn outcome(scope: Scope, result: catalog::Result<Vec<EnrichedMovie>>) -> Outcome {
        result.map_err(|source| (ViewFailure::new(scope, &source), source))
    }

    fn for_state(outcome: &Outcome) -> Result<Vec<EnrichedMovie>, ViewFailure> {
        match outcome {
            Ok(movies) => Ok(movies.clone()),
            Err((failure, _)) => Err(failure.clone()),
        }
    }

    fn settle(token: RequestToken, applied: bool, outcome: Outcome) -> Result<Vec<EnrichedMovie>, ViewError> {
        if !applied {
            debug!("Discarding response for superseded request {}", token);
            return Err(ViewError::Superseded { token });
        }

        outcome.map_err(|(failure, source)| {
            error!("{} ({})", failure, failure.detail);
            ViewError::Failed { failure, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::VisibleView;
    use movie_data::{CastMember, Credits, CrewMember, MovieId, MovieSummary};
    use std::sync::Arc;
    use tmdb_client::{MockMovieApi, RecordedCall};

    fn credits(director: &str, lead: &str) -> Credits {
        Credits::new(
            vec![CastMember::new(1, lead)],
            vec![CrewMember::new(2, director, "Director")],
        )
    }

    fn build_test_api() -> MockMovieApi {
        MockMovieApi::new()
            .with_popular(vec![MovieSummary::new(1, "Popular")])
            .with_search("Heat", vec![MovieSummary::new(949, "Heat")])
            .with_recommendations(1, vec![MovieSummary::new(20, "Rec A"), MovieSummary::new(21, "Rec B")])
            .with_recommendations(949, vec![MovieSummary::new(30, "Rec C")])
            .with_credits(1, credits("A", "B"))
            .with_credits(949, credits("Michael Mann", "Al Pacino"))
            .with_credits(20, Credits::default())
            .with_credits(21, Credits::default())
            .with_credits(30, Credits::default())
    }

    fn build_test_browser(api: &MockMovieApi) -> MovieBrowser {
        MovieBrowser::new(MovieService::new(Arc::new(api.clone())))
    }

    fn ids(movies: &[EnrichedMovie]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id()).collect()
    }

    #[tokio::test]
    async fn test_initial_catalog_load() {
        let api = build_test_api();
        let browser = build_test_browser(&api);

        let catalog = browser.get_catalog("").await.unwrap();
        assert_eq!(ids(&catalog), vec![1]);
        assert_eq!(catalog[0].director_name(), Some("A"));

        let state = browser.snapshot();
        assert_eq!(state.visible(), VisibleView::MovieGrid(&catalog));
        assert!(!state.query().loading);
        assert!(browser.can_search());
    }

    #[tokio::test]
    async fn test_catalog_failure_keeps_previous_catalog() {
        let api = build_test_api().failing(RecordedCall::Search("Heat".to_string()));
        let browser = build_test_browser(&api);
        browser.get_catalog("").await.unwrap();

        let err = browser.get_catalog("Heat").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies.");

        let state = browser.snapshot();
        assert_eq!(state.query().error.as_deref(), Some("Failed to fetch movies."));
        assert_eq!(state.query().term, "Heat");
        assert_eq!(state.catalog().data().map(|m| ids(m)), Some(vec![1]));
    }

    #[tokio::test]
    async fn test_catalog_credit_failure_keeps_previous_catalog() {
        let api = build_test_api().failing(RecordedCall::Credits(949));
        let browser = build_test_browser(&api);
        let popular = browser.get_catalog("").await.unwrap();

        let err = browser.get_catalog("Heat").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch movies.");
        assert_eq!(err.failure().and_then(|f| f.movie_id), Some(949));

        let state = browser.snapshot();
        match state.catalog() {
            LoadState::Failed { failure, previous } => {
                assert_eq!(failure.scope, Scope::Catalog);
                assert_eq!(previous.as_ref(), Some(&popular));
            }
            other => panic!("expected a failed catalog, got {:?}", other),
        }
        assert!(matches!(state.visible(), VisibleView::Error(_)));

        // Going back to the grid shows the last good list, not a partial one
        assert_eq!(ids(&browser.back_to_catalog()), vec![1]);
    }

    #[tokio::test]
    async fn test_loading_is_observable() {
        let api = build_test_api();
        let gate = api.gate(RecordedCall::Popular);
        let browser = build_test_browser(&api);
        let mut rx = browser.subscribe();

        let observe = async {
            rx.changed().await.unwrap();
            let loading = rx.borrow_and_update().query().loading;
            gate.notify_one();
            loading
        };

        let (result, saw_loading) = tokio::join!(browser.get_catalog(""), observe);
        assert!(result.is_ok());
        assert!(saw_loading);
        assert!(!browser.query().loading);
    }

    #[tokio::test]
    async fn test_select_movie_populates_recommendations() {
        let api = build_test_api();
        let browser = build_test_browser(&api);
        let catalog = browser.get_catalog("").await.unwrap();

        let recs = browser.select_movie(catalog[0].clone()).await.unwrap();
        assert_eq!(ids(&recs), vec![20, 21]);
        assert!(api.calls().contains(&RecordedCall::Recommendations(1)));

        let state = browser.snapshot();
        assert_eq!(state.navigation().selected().map(|m| m.id()), Some(1));
        assert!(!browser.can_search());
        match state.visible() {
            VisibleView::RecommendationGrid { selected, movies } => {
                assert_eq!(selected.id(), 1);
                assert_eq!(ids(movies), vec![20, 21]);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_recommendation_credit_failure_keeps_selection() {
        let api = build_test_api().failing(RecordedCall::Credits(21));
        let browser = build_test_browser(&api);
        let catalog = browser.get_catalog("").await.unwrap();

        let err = browser.select_movie(catalog[0].clone()).await.unwrap_err();
        assert_eq!(err.failure().and_then(|f| f.movie_id), Some(21));

        let state = browser.snapshot();
        assert_eq!(state.navigation().selected().map(|m| m.id()), Some(1));
        let recs = state.navigation().recommendations().unwrap();
        assert!(recs.data().is_none());
        assert_eq!(
            state.query().error.as_deref(),
            Some("Failed to fetch recommended movies.")
        );
        // The catalog underneath is untouched
        assert_eq!(state.catalog(), &LoadState::Loaded(catalog));
    }

    #[tokio::test]
    async fn test_selecting_again_discards_previous_recommendations() {
        let api = build_test_api();
        let browser = build_test_browser(&api);
        let catalog = browser.get_catalog("").await.unwrap();
        let recs = browser.select_movie(catalog[0].clone()).await.unwrap();

        // Recommended movies are selectable too; 20 has no recommendations
        let next = browser.select_movie(recs[0].clone()).await.unwrap();
        assert!(next.is_empty());

        let state = browser.snapshot();
        assert_eq!(state.navigation().selected().map(|m| m.id()), Some(20));
        assert_eq!(state.visible(), VisibleView::RecommendationGrid {
            selected: &recs[0],
            movies: &[],
        });
    }

    #[tokio::test]
    async fn test_return_home_clears_selection_and_search() {
        let api = build_test_api();
        let browser = build_test_browser(&api);
        let results = browser.get_catalog("Heat").await.unwrap();
        browser.select_movie(results[0].clone()).await.unwrap();

        api.clear_calls();
        let home = browser.return_home().await.unwrap();
        assert_eq!(ids(&home), vec![1]);
        assert_eq!(api.calls()[0], RecordedCall::Popular);

        let state = browser.snapshot();
        assert!(state.navigation().is_browsing());
        assert!(state.navigation().recommendations().is_none());
        assert_eq!(state.search_term(), "");
    }

    #[tokio::test]
    async fn test_back_to_catalog_does_not_refetch() {
        let api = build_test_api();
        let browser = build_test_browser(&api);
        let results = browser.get_catalog("Heat").await.unwrap();
        browser.select_movie(results[0].clone()).await.unwrap();

        api.clear_calls();
        let catalog = browser.back_to_catalog();
        assert_eq!(ids(&catalog), vec![949]);
        assert!(api.calls().is_empty());
        assert_eq!(browser.snapshot().search_term(), "Heat");
        assert!(browser.can_search());
    }

    #[tokio::test]
    async fn test_stale_catalog_response_is_discarded() {
        let api = build_test_api();
        let gate = api.gate(RecordedCall::Popular);
        let browser = build_test_browser(&api);

        let slow = browser.get_catalog("");
        let fast = async {
            let result = browser.get_catalog("Heat").await;
            gate.notify_one();
            result
        };

        let (slow_result, fast_result) = tokio::join!(slow, fast);
        assert!(slow_result.unwrap_err().is_superseded());
        assert_eq!(ids(&fast_result.unwrap()), vec![949]);

        // The older popular listing never overwrote the search results
        let state = browser.snapshot();
        assert_eq!(state.catalog().data().map(|m| ids(m)), Some(vec![949]));
        assert_eq!(state.search_term(), "Heat");
    }

    #[tokio::test]
    async fn test_stale_recommendations_are_discarded() {
        let api = build_test_api();
        let gate = api.gate(RecordedCall::Recommendations(1));
        let browser = build_test_browser(&api);
        let popular = browser.get_catalog("").await.unwrap();
        let heat = browser.get_catalog("Heat").await.unwrap();

        let first = browser.select_movie(popular[0].clone());
        let second = async {
            let result = browser.select_movie(heat[0].clone()).await;
            gate.notify_one();
            result
        };

        let (first_result, second_result) = tokio::join!(first, second);
        assert!(first_result.unwrap_err().is_superseded());
        assert_eq!(ids(&second_result.unwrap()), vec![30]);

        let state = browser.snapshot();
        assert_eq!(state.navigation().selected().map(|m| m.id()), Some(949));
    }

    #[tokio::test]
    async fn test_return_home_discards_in_flight_recommendations() {
        let api = build_test_api();
        let gate = api.gate(RecordedCall::Recommendations(1));
        let browser = build_test_browser(&api);
        let popular = browser.get_catalog("").await.unwrap();

        let select = browser.select_movie(popular[0].clone());
        let home = async {
            let result = browser.return_home().await;
            gate.notify_one();
            result
        };

        let (select_result, home_result) = tokio::join!(select, home);
        assert!(select_result.unwrap_err().is_superseded());
        assert!(home_result.is_ok());
        assert!(browser.snapshot().navigation().is_browsing());
    }
}
