//! Client configuration loaded from environment variables.
//!
//! - `HERO_TOUR_URL` - Base URL of the backend (default: `http://127.0.0.1:17020`)
//! - `HERO_TOUR_SEARCH_DEBOUNCE_MS` - Pause before a typed search term is sent (default: 300)

use std::time::Duration;

/// Default backend URL for local development.
pub const DEFAULT_URL: &str = "http://127.0.0.1:17020";

/// Resource path of the hero collection, relative to the base URL.
pub const HEROES_PATH: &str = "api/heroes";

const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, without the resource path.
    pub base_url: String,
    /// How long the search view waits for typing to stop.
    pub search_debounce: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("HERO_TOUR_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());

        let search_debounce = std::env::var("HERO_TOUR_SEARCH_DEBOUNCE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE);

        Self {
            base_url,
            search_debounce,
        }
    }

    /// Create a config pointing at the given backend, other settings default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }

    /// Full URL of the hero collection.
    pub fn heroes_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), HEROES_PATH)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_URL)
    }
}
