//! Board configuration

use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;

/// Default resource location.
pub const DEFAULT_LOCATION: &str = "data.json";

/// Configuration for loading and searching the board.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use coinboard_lib::BoardConfig;
///
/// let config = BoardConfig::default()
///     .with_location("https://example.com/markets.json")
///     .with_cache_initial_load(true)
///     .with_request_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// File path or `http(s)` URL of the record list.
    ///
    /// Default: `data.json`
    pub location: String,

    /// Quiescence window before a typed search runs.
    ///
    /// Default: 300 milliseconds
    pub debounce: Duration,

    /// Keep the first successful load and filter it in memory instead of
    /// re-fetching on every search.
    ///
    /// Default: `false`
    pub cache_initial_load: bool,

    /// Per-request timeout for HTTP sources.
    pub request_timeout: Option<Duration>,

    /// Connect timeout for HTTP sources.
    pub connect_timeout: Option<Duration>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            cache_initial_load: false,
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl BoardConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the debounce window.
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Enables or disables caching of the initial load.
    pub fn with_cache_initial_load(mut self, enabled: bool) -> Self {
        self.cache_initial_load = enabled;
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the HTTP connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}
