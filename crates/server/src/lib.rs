//! Server crate for the movie browser.
//!
//! This crate contains the fetch-and-enrich service and the stateful
//! browser that a presentation layer drives.

pub mod browser;
pub mod service;
pub mod state;

pub use browser::MovieBrowser;
pub use service::MovieService;
pub use state::{
    BrowserState, LoadState, NavigationState, QueryState, RequestToken, Scope, ViewError,
    ViewFailure, VisibleView,
};
