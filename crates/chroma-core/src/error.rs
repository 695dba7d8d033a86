//! Errors that abort an analysis.

use crate::config::ConfigError;
use crate::session::SessionError;
use thiserror::Error;

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// A request-level failure. Element-level problems never surface here.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// No URL was given.
    #[error("url must not be blank")]
    BlankUrl,

    /// The browser session failed (acquire, navigate, query).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The analyzer was configured with unusable values.
    #[error("invalid analyzer configuration: {0}")]
    Config(#[from] ConfigError),
}

impl AnalyzeError {
    /// True when the failure lies with the browser or the target page
    /// rather than with the request itself.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, AnalyzeError::Session(_))
    }
}
