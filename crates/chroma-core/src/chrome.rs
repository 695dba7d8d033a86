//! [`BrowserSession`] over chroma-browser's Chrome tab.

use crate::session::{BrowserSession, ElementError, SessionError, SessionProvider};
use async_trait::async_trait;
use chroma_browser::{BrowserError, BrowserSettings, ChromeBrowser, ElementRef, Page};
use std::collections::HashMap;
use tracing::{debug, warn};

impl From<BrowserError> for ElementError {
    fn from(err: BrowserError) -> Self {
        if err.is_stale() {
            ElementError::Stale
        } else {
            ElementError::Failed(err.to_string())
        }
    }
}

/// A Chrome process (or remote connection) plus the one tab it drives.
pub struct ChromeSession {
    browser: ChromeBrowser,
    page: Page,
}

impl ChromeSession {
    /// Launches or attaches per `settings` and opens a tab.
    ///
    /// # Errors
    ///
    /// [`SessionError::Acquisition`] if Chrome cannot be started or reached.
    pub async fn open(settings: BrowserSettings) -> Result<Self, SessionError> {
        let browser = ChromeBrowser::launch(settings)
            .await
            .map_err(|e| SessionError::Acquisition(e.to_string()))?;

        match browser.new_page().await {
            Ok(page) => Ok(Self { browser, page }),
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after page creation error: {}", close_err);
                }
                Err(SessionError::Acquisition(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Element = ElementRef;

    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        self.page
            .navigate(url)
            .await
            .map_err(|e| SessionError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn query_elements(&self, selector: &str) -> Result<Vec<ElementRef>, SessionError> {
        self.page
            .query_selector_all(selector)
            .await
            .map_err(|e| SessionError::Query {
                selector: selector.to_string(),
                reason: e.to_string(),
            })
    }

    async fn computed_style(
        &self,
        element: &ElementRef,
        properties: &[String],
    ) -> Result<HashMap<String, String>, ElementError> {
        Ok(element.computed_style(properties).await?)
    }

    async fn outer_html(&self, element: &ElementRef) -> Result<Option<String>, ElementError> {
        Ok(element.outer_html().await?)
    }

    async fn inner_text(&self, element: &ElementRef) -> Result<String, ElementError> {
        Ok(element.inner_text().await?)
    }

    async fn count_children(&self, element: &ElementRef) -> Result<usize, ElementError> {
        Ok(element.child_count().await?)
    }

    async fn close(self) -> Result<(), SessionError> {
        let page_result = self.page.close().await;
        let browser_result = self.browser.close().await;
        debug!("Browser session closed");

        page_result
            .and(browser_result)
            .map_err(|e| SessionError::Close(e.to_string()))
    }
}

/// Opens one [`ChromeSession`] per analysis.
#[derive(Debug, Clone, Default)]
pub struct ChromeSessionProvider {
    settings: BrowserSettings,
}

impl ChromeSessionProvider {
    /// A provider that launches or attaches per `settings`.
    #[must_use]
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    /// The settings each session is opened with.
    #[must_use]
    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }
}

#[async_trait]
impl SessionProvider for ChromeSessionProvider {
    type Session = ChromeSession;

    async fn acquire(&self) -> Result<ChromeSession, SessionError> {
        ChromeSession::open(self.settings.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_browser_errors_become_stale_element_errors() {
        assert_eq!(ElementError::from(BrowserError::StaleElement), ElementError::Stale);
    }

    #[test]
    fn other_browser_errors_keep_their_message() {
        let err = ElementError::from(BrowserError::ScriptExecutionFailed("boom".into()));
        assert!(matches!(err, ElementError::Failed(msg) if msg.contains("boom")));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn provider_opens_and_closes_a_session() {
        let provider = ChromeSessionProvider::new(BrowserSettings::default());
        let session = provider.acquire().await.expect("session");
        session.navigate("about:blank").await.expect("navigate");
        session.close().await.expect("close");
    }
}
