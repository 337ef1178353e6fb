//! Result and error types for Vitrina.

use thiserror::Error;

/// Result type for Vitrina operations
pub type VitrinaResult<T> = Result<T, VitrinaError>;

/// Errors that can occur in Vitrina
#[derive(Debug, Error)]
pub enum VitrinaError {
    /// Browser executable not found
    #[error("Browser not found. Install Chromium or set CHROMIUM_PATH")]
    BrowserNotFound,

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Element query timed out
    #[error("No element matched `{selector}` within {ms}ms")]
    ElementTimeout {
        /// Selector that never matched
        selector: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Input simulation error
    #[error("Input simulation failed on `{selector}`: {message}")]
    Input {
        /// Target selector
        selector: String,
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Stub registered after the session already navigated
    #[error("Stub for `{pattern}` registered after navigation; stubs must be in place before visit()")]
    StubAfterNavigation {
        /// URL pattern of the late stub
        pattern: String,
    },

    /// Fixture could not be loaded
    #[error("Fixture `{name}` error: {message}")]
    Fixture {
        /// Fixture name
        name: String,
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VitrinaError {
    /// Whether this error represents a failed assertion (as opposed to a
    /// harness/environment fault). Assertion failures mark a case failed;
    /// everything else still fails the case but points at the setup.
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::AssertionFailed { .. } | Self::ElementTimeout { .. }
        )
    }
}
