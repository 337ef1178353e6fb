//! Harness configuration.

use std::time::Duration;

/// Default origin of the site under test. The site is assumed to already be
/// running; Vitrina never starts it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1337";

/// Default timeout for element queries (5 seconds)
pub const DEFAULT_ELEMENT_TIMEOUT_MS: u64 = 5000;

/// Default timeout for navigation (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Configuration for a test run
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the site under test
    pub base_url: String,
    /// Run the browser in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Timeout for navigation
    pub navigation_timeout: Duration,
    /// Timeout for element queries
    pub element_timeout: Duration,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            navigation_timeout: Duration::from_millis(DEFAULT_NAVIGATION_TIMEOUT_MS),
            element_timeout: Duration::from_millis(DEFAULT_ELEMENT_TIMEOUT_MS),
            chromium_path: None,
        }
    }
}

impl Config {
    /// Create a config with defaults, honoring the `VITRINA_BASE_URL`
    /// environment variable when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("VITRINA_BASE_URL") {
            if !url.is_empty() {
                config.base_url = url;
            }
        }
        config
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the element query timeout
    #[must_use]
    pub const fn with_element_timeout(mut self, timeout: Duration) -> Self {
        self.element_timeout = timeout;
        self
    }

    /// Set the navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set the chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Resolve a path relative to the base URL.
    ///
    /// `root_url()` is the common case; the suites only ever visit the root.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// URL of the site root
    #[must_use]
    pub fn root_url(&self) -> String {
        self.url_for("")
    }
}
