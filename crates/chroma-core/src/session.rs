//! The browser capability the pipeline runs against.
//!
//! [`BrowserSession`] is the narrow slice of browser automation the analysis
//! needs. Production code uses the Chrome implementation in [`crate::chrome`];
//! tests drive the pipeline with a scripted session.
//!
//! Errors are split by blast radius. [`SessionError`] ends the request.
//! [`ElementError`] costs one element.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Failures that abort the whole analysis.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The browser could not be launched or reached.
    #[error("could not acquire a browser session: {0}")]
    Acquisition(String),

    /// The page could not be loaded.
    #[error("could not load '{url}': {reason}")]
    Navigation {
        /// Target URL.
        url: String,
        /// Underlying failure.
        reason: String,
    },

    /// The candidate query itself failed.
    #[error("element query '{selector}' failed: {reason}")]
    Query {
        /// Selector that was run.
        selector: String,
        /// Underlying failure.
        reason: String,
    },

    /// Teardown failed. Reported, never fatal to an already built report.
    #[error("could not close the browser session: {0}")]
    Close(String),
}

/// Failures scoped to one element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
    /// The element left the document between query and read.
    #[error("element is no longer attached to the document")]
    Stale,

    /// The round-trip exceeded the configured call timeout.
    #[error("browser call timed out after {0:?}")]
    Timeout(Duration),

    /// Any other failure of the round-trip.
    #[error("browser call failed: {0}")]
    Failed(String),
}

/// One browser tab, used sequentially by a single analysis.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Opaque element reference.
    type Element: Send + Sync;

    /// Loads `url` and waits for it to finish loading.
    async fn navigate(&self, url: &str) -> Result<(), SessionError>;

    /// Returns the elements matching `selector`, in document order.
    async fn query_elements(&self, selector: &str) -> Result<Vec<Self::Element>, SessionError>;

    /// Computed values for `properties`. Implementations may return extra keys.
    async fn computed_style(
        &self,
        element: &Self::Element,
        properties: &[String],
    ) -> Result<HashMap<String, String>, ElementError>;

    /// The element's serialized markup, if the browser provides one.
    async fn outer_html(&self, element: &Self::Element) -> Result<Option<String>, ElementError>;

    /// Rendered text; empty for invisible elements.
    async fn inner_text(&self, element: &Self::Element) -> Result<String, ElementError>;

    /// Number of direct element children.
    async fn count_children(&self, element: &Self::Element) -> Result<usize, ElementError>;

    /// Releases the tab and any browser process behind it.
    async fn close(self) -> Result<(), SessionError>
    where
        Self: Sized;
}

/// Hands out a fresh, unshared session per analysis.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The session type produced.
    type Session: BrowserSession;

    /// Acquires a new session.
    async fn acquire(&self) -> Result<Self::Session, SessionError>;
}
