//! Client configuration.
//!
//! The API key is the only required setting. A missing key is not a startup
//! error: it is logged once and every request then fails upstream with 401.

use std::env;
use std::fmt;
use std::time::Duration;

use movie_data::DEFAULT_IMAGE_BASE_URL;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variables read by [`TmdbConfig::from_env`]
pub const API_KEY_ENV: &str = "TMDB_API_KEY";
pub const BASE_URL_ENV: &str = "TMDB_BASE_URL";
pub const LANGUAGE_ENV: &str = "TMDB_LANGUAGE";
pub const IMAGE_BASE_URL_ENV: &str = "TMDB_IMAGE_BASE_URL";

/// Settings shared by every request the client sends
#[derive(Clone)]
pub struct TmdbConfig {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    timeout: Duration,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the configuration from `TMDB_API_KEY`, `TMDB_BASE_URL`,
    /// `TMDB_LANGUAGE` and `TMDB_IMAGE_BASE_URL`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(API_KEY_ENV).unwrap_or_default();
        if api_key.trim().is_empty() {
            warn!("{} is not set; upstream requests will be rejected", API_KEY_ENV);
        }

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        if let Some(language) = lookup(LANGUAGE_ENV) {
            config = config.with_language(language);
        }
        if let Some(image_base_url) = lookup(IMAGE_BASE_URL_ENV) {
            config = config.with_image_base_url(image_base_url);
        }
        config
    }

    /// Override the API root. A trailing slash is added when missing so that
    /// endpoint paths join underneath it instead of replacing the last segment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// The key never goes to logs
impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<missing>" })
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}
