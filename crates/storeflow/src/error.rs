// Error types for storeflow

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for storeflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving the storefront
#[derive(Debug, Error)]
pub enum Error {
    /// Element never appeared within the implicit wait bound
    ///
    /// The selector was polled for the full wait duration without a match.
    /// Common causes: the page has not finished rendering, the navigation
    /// that should have produced the element failed, or the site markup
    /// changed out from under the selector.
    #[error("element not found: {selector} (waited {waited_ms}ms)")]
    ElementNotFound { selector: String, waited_ms: u64 },

    /// A listing that must contain at least one entry was empty
    ///
    /// Raised instead of an out-of-range index fault so an empty product
    /// grid reads as a distinct test signal.
    #[error("empty listing: {0}")]
    EmptyListing(String),

    /// Cart badge text could not be parsed as a count
    ///
    /// A non-numeric badge is a meaningful failure, never a silent zero.
    #[error("cart badge text {text:?} is not a number")]
    CartBadge {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Person data file missing, unreadable, or malformed
    ///
    /// Surfaces at data-provisioning time, before any scenario body runs,
    /// so a bad fixture never masquerades as a UI failure.
    #[error("failed to read person records from {}: {source}", path.display())]
    DataFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// Browser session failed to open
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser session failed to close cleanly
    #[error("failed to close browser: {0}")]
    CloseFailed(String),

    /// Error reported by the browser-automation engine
    #[error("driver error: {0}")]
    Driver(String),

    /// A scenario's final check did not hold
    #[error("assertion failed: {context}: expected {expected}, got {actual}")]
    Assertion {
        context: String,
        expected: String,
        actual: String,
    },

    /// Assertion did not become true within its timeout (expect API)
    #[error("assertion timeout: {0}")]
    AssertionTimeout(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
