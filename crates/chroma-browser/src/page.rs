//! Page-level browser operations and navigation.
//!
//! This module provides the Page type, which represents a browser tab and
//! exposes navigation, script evaluation and CSS selector queries.

use crate::element::ElementRef;
use crate::error::{BrowserError, Result};
use crate::wait::{WaitConfig, wait_for_result};
use chromiumoxide::page::Page as ChromePage;
use tracing::debug;

/// A browser tab.
#[derive(Debug)]
pub struct Page {
    inner: ChromePage,
    load_wait: WaitConfig,
}

impl Page {
    /// Wraps a chromiumoxide page. Constructed by [`crate::ChromeBrowser::new_page`].
    pub(crate) fn new(page: ChromePage, load_wait: WaitConfig) -> Self {
        Self {
            inner: page,
            load_wait,
        }
    }

    /// Navigates to an absolute URL and waits for the document to finish loading.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`
    /// if it never reaches `readyState == "complete"`.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(self.load_wait).await?;
        debug!("Loaded {}", url);
        Ok(())
    }

    /// Waits for `document.readyState` to become `"complete"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait times out.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        let page = self;
        wait_for_result(
            move || async move {
                let ready: String = page.evaluate("document.readyState").await?;
                Ok(ready == "complete")
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// Do not pass unsanitized user input; encode values with `serde_json`
    /// before splicing them into a script.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Returns every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the selector is invalid or the query round-trip fails.
    pub async fn query_selector_all(&self, selector: &str) -> Result<Vec<ElementRef>> {
        let elements = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(format!("query '{selector}': {e}")))?;

        Ok(elements.into_iter().map(ElementRef::new).collect())
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(self) -> Result<()> {
        self.inner.close().await.map_err(BrowserError::ChromiumOxide)
    }
}
