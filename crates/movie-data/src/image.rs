//! Poster URL construction.

use crate::types::{EnrichedMovie, MovieSummary};

/// Default image host and size segment used for grid posters
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const POSTER_SIZE: &str = "w500";

/// Full poster URL for a relative poster path.
///
/// Returns `None` when the path is absent or empty, in which case the view
/// should render no image at all.
pub fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.filter(|p| !p.is_empty())?;
    let base = image_base_url.trim_end_matches('/');
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{base}/{POSTER_SIZE}{separator}{path}"))
}

impl MovieSummary {
    /// Poster URL on the given image host
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        poster_url(image_base_url, self.poster_path.as_deref())
    }
}

impl EnrichedMovie {
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.summary.poster_url(image_base_url)
    }
}
