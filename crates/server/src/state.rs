//! View state for the movie browser.
//!
//! Each view is a single tagged [`LoadState`] instead of independent
//! loading/error/data flags, so combinations like "loading while showing a
//! stale error" cannot be represented. The last good data rides along inside
//! `Loading` and `Failed` so a failed reload never throws it away.

use std::error::Error as StdError;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use catalog::BrowseError;
use movie_data::{EnrichedMovie, MovieId};
use thiserror::Error;

// =============================================================================
// Request tokens
// =============================================================================

/// Monotonic id given to every fetch. Only the response carrying the latest
/// token for a view is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub(crate) struct TokenIssuer(AtomicU64);

impl TokenIssuer {
    pub(crate) fn next(&self) -> RequestToken {
        RequestToken(self.0.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

// =============================================================================
// Failures
// =============================================================================

/// Which view a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Catalog,
    Recommendations,
}

impl Scope {
    /// Generic message shown in place of the view
    pub fn user_message(&self) -> &'static str {
        match self {
            Scope::Catalog => "Failed to fetch movies.",
            Scope::Recommendations => "Failed to fetch recommended movies.",
        }
    }
}

/// A failure as stored in view state: the generic message plus the rendered
/// cause chain for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFailure {
    pub scope: Scope,
    /// Movie whose credits lookup failed, for enrichment failures
    pub movie_id: Option<MovieId>,
    pub detail: String,
}

impl ViewFailure {
    pub fn new(scope: Scope, error: &BrowseError) -> Self {
        let movie_id = match error {
            BrowseError::EnrichmentFailed { movie_id, .. } => Some(*movie_id),
            BrowseError::CatalogFetchFailed { .. } => None,
        };
        Self {
            scope,
            movie_id,
            detail: error_chain(error),
        }
    }

    pub fn message(&self) -> &'static str {
        self.scope.user_message()
    }
}

impl fmt::Display for ViewFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

fn error_chain(error: &dyn StdError) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Errors returned by `MovieBrowser` operations
#[derive(Error, Debug)]
pub enum ViewError {
    /// The fetch failed; the view now shows `failure`
    #[error("{failure}")]
    Failed {
        failure: ViewFailure,
        #[source]
        source: BrowseError,
    },

    /// A newer request for the same view was issued while this one was in
    /// flight, so its result was discarded
    #[error("Request {token} was superseded by a newer request")]
    Superseded { token: RequestToken },
}

impl ViewError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, ViewError::Superseded { .. })
    }

    pub fn failure(&self) -> Option<&ViewFailure> {
        match self {
            ViewError::Failed { failure, .. } => Some(failure),
            ViewError::Superseded { .. } => None,
        }
    }
}

// =============================================================================
// LoadState
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Idle,
    Loading {
        token: RequestToken,
        previous: Option<T>,
    },
    Loaded(T),
    Failed {
        failure: ViewFailure,
        previous: Option<T>,
    },
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading { .. })
    }

    pub fn failure(&self) -> Option<&ViewFailure> {
        match self {
            LoadState::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Latest good data: the loaded value, or the one carried through a
    /// reload or failure
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            LoadState::Loading { previous, .. } | LoadState::Failed { previous, .. } => {
                previous.as_ref()
            }
            LoadState::Idle => None,
        }
    }

    /// Token of the outstanding request, if any
    pub fn pending_token(&self) -> Option<RequestToken> {
        match self {
            LoadState::Loading { token, .. } => Some(*token),
            _ => None,
        }
    }

    pub(crate) fn is_current(&self, token: RequestToken) -> bool {
        self.pending_token() == Some(token)
    }

    fn take_data(&mut self) -> Option<T> {
        match std::mem::take(self) {
            LoadState::Loaded(data) => Some(data),
            LoadState::Loading { previous, .. } | LoadState::Failed { previous, .. } => previous,
            LoadState::Idle => None,
        }
    }

    /// Start (or restart) a load, superseding any outstanding request
    pub(crate) fn begin(&mut self, token: RequestToken) {
        let previous = self.take_data();
        *self = LoadState::Loading { token, previous };
    }

    /// Settle the outstanding load. Success replaces the data and clears any
    /// earlier failure; failure keeps the previous data.
    pub(crate) fn finish(&mut self, outcome: Result<T, ViewFailure>) {
        let previous = self.take_data();
        *self = match outcome {
            Ok(data) => LoadState::Loaded(data),
            Err(failure) => LoadState::Failed { failure, previous },
        };
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Which grid the browser is showing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationState {
    #[default]
    Browsing,
    Viewing {
        selected: EnrichedMovie,
        recommendations: LoadState<Vec<EnrichedMovie>>,
    },
}

impl NavigationState {
    pub fn is_browsing(&self) -> bool {
        matches!(self, NavigationState::Browsing)
    }

    pub fn selected(&self) -> Option<&EnrichedMovie> {
        match self {
            NavigationState::Viewing { selected, .. } => Some(selected),
            NavigationState::Browsing => None,
        }
    }

    pub fn recommendations(&self) -> Option<&LoadState<Vec<EnrichedMovie>>> {
        match self {
            NavigationState::Viewing { recommendations, .. } => Some(recommendations),
            NavigationState::Browsing => None,
        }
    }
}

// =============================================================================
// BrowserState
// =============================================================================

/// Search box state as a view sees it; derived, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub term: String,
    pub loading: bool,
    pub error: Option<String>,
}

/// What the front-end should render right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleView<'a> {
    Loading,
    /// A failure replaces the whole view
    Error(&'a ViewFailure),
    MovieGrid(&'a [EnrichedMovie]),
    RecommendationGrid {
        selected: &'a EnrichedMovie,
        movies: &'a [EnrichedMovie],
    },
}

/// Complete browser state, published through a watch channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    pub(crate) search_term: String,
    pub(crate) catalog: LoadState<Vec<EnrichedMovie>>,
    pub(crate) navigation: NavigationState,
}

impl BrowserState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn catalog(&self) -> &LoadState<Vec<EnrichedMovie>> {
        &self.catalog
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Load state of whichever grid is on screen
    fn active(&self) -> &LoadState<Vec<EnrichedMovie>> {
        match &self.navigation {
            NavigationState::Browsing => &self.catalog,
            NavigationState::Viewing { recommendations, .. } => recommendations,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.active().is_loading()
    }

    pub fn error(&self) -> Option<&ViewFailure> {
        self.active().failure()
    }

    pub fn query(&self) -> QueryState {
        QueryState {
            term: self.search_term.clone(),
            loading: self.is_loading(),
            error: self.error().map(|f| f.message().to_string()),
        }
    }

    pub fn visible(&self) -> VisibleView<'_> {
        let active = self.active();
        if active.is_loading() {
            return VisibleView::Loading;
        }
        if let Some(failure) = active.failure() {
            return VisibleView::Error(failure);
        }

        let movies = active.data().map(Vec::as_slice).unwrap_or(&[]);
        match &self.navigation {
            NavigationState::Browsing => VisibleView::MovieGrid(movies),
            NavigationState::Viewing { selected, .. } => {
                VisibleView::RecommendationGrid { selected, movies }
            }
        }
    }
}
