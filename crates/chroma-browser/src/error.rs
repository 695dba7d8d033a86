//! Error types for browser session operations.
//!
//! This module distinguishes between failures that doom a whole session
//! (launch, connection, navigation) and failures scoped to a single DOM
//! element (a detached node, a script that threw). Callers walking a live
//! page rely on that split to skip one element without abandoning the rest.

use std::time::Duration;
use thiserror::Error;

/// Marker thrown by injected element scripts when the node is detached.
pub(crate) const STALE_MARKER: &str = "chroma:stale-element";

/// CDP error messages that mean the referenced node no longer exists.
const MISSING_NODE_MESSAGES: &[&str] = &[
    "Could not find node",
    "No node with given id",
    "Cannot find context with specified id",
    "Could not find object with given id",
    "Node is detached",
];

/// The main error type for all browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// The element was removed from the document between query and read.
    #[error("element reference is stale")]
    StaleElement,

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// A script returned a payload we could not decode.
    #[error("malformed script result: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrowserError {
    /// Classifies a CDP error raised by an element-scoped call.
    ///
    /// Chrome reports a node that vanished mid-traversal as a protocol error
    /// with one of a handful of messages; those become [`BrowserError::StaleElement`].
    pub(crate) fn from_element_call(err: chromiumoxide::error::CdpError) -> Self {
        let message = err.to_string();
        if is_missing_node_message(&message) {
            BrowserError::StaleElement
        } else {
            BrowserError::ChromiumOxide(err)
        }
    }

    /// Classifies an exception thrown inside an injected element script.
    pub(crate) fn from_script_exception(description: &str) -> Self {
        if description.contains(STALE_MARKER) || is_missing_node_message(description) {
            BrowserError::StaleElement
        } else {
            BrowserError::ScriptExecutionFailed(description.to_string())
        }
    }

    /// Returns true if this error refers to a detached DOM node.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        matches!(self, BrowserError::StaleElement)
    }
}

fn is_missing_node_message(message: &str) -> bool {
    MISSING_NODE_MESSAGES
        .iter()
        .any(|needle| message.contains(needle))
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_marker_is_classified_as_stale() {
        let err = BrowserError::from_script_exception(&format!(
            "Error: {STALE_MARKER}\n    at <anonymous>:2:9"
        ));
        assert!(err.is_stale());
    }

    #[test]
    fn missing_node_message_is_classified_as_stale() {
        let err = BrowserError::from_script_exception("Could not find node with given id");
        assert!(err.is_stale());
    }

    #[test]
    fn other_exceptions_stay_script_failures() {
        let err = BrowserError::from_script_exception("TypeError: x is undefined");
        assert!(
            matches!(err, BrowserError::ScriptExecutionFailed(msg) if msg.contains("TypeError"))
        );
    }
}
