//! In-memory [`BrowserSession`] for exercising the pipeline without Chrome.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream crates.

use crate::session::{BrowserSession, ElementError, SessionError, SessionProvider};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A scripted DOM element.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeElement {
    text: String,
    children: usize,
    style: Option<HashMap<String, String>>,
    fragment: Option<String>,
    detached: bool,
    stale_style: bool,
    style_delay: Option<Duration>,
}

impl FakeElement {
    /// A visible, childless element with the given markup and no styles.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            text: "text".to_string(),
            children: 0,
            style: Some(HashMap::new()),
            fragment: Some(fragment.into()),
            detached: false,
            stale_style: false,
            style_delay: None,
        }
    }

    /// A `<p>` with the given text colour and background, plus a few values
    /// a browser would also report.
    pub fn paragraph(color: &str, background: &str) -> Self {
        Self::new(format!(
            r#"<p style="color: {color}; background-color: {background}">text</p>"#
        ))
        .with_property("color", color)
        .with_property("background-color", background)
        .with_property("border-top-width", "0px")
        .with_property("font-size", "16px")
    }

    /// Sets the rendered text; blank text fails qualification.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the direct child count.
    #[must_use]
    pub fn with_children(mut self, children: usize) -> Self {
        self.children = children;
        self
    }

    /// Adds one computed-style value.
    #[must_use]
    pub fn with_property(mut self, property: &str, value: &str) -> Self {
        self.style
            .get_or_insert_with(HashMap::new)
            .insert(property.to_string(), value.to_string());
        self
    }

    /// Makes the style read fail with a script error.
    #[must_use]
    pub fn failing_style(mut self) -> Self {
        self.style = None;
        self
    }

    /// Delays the style read.
    #[must_use]
    pub fn slow_style(mut self, delay: Duration) -> Self {
        self.style_delay = Some(delay);
        self
    }

    /// The browser reports no markup for this element.
    #[must_use]
    pub fn without_fragment(mut self) -> Self {
        self.fragment = None;
        self
    }

    /// Passes qualification, then goes stale before its style is read.
    #[must_use]
    pub fn stale_during_style(mut self) -> Self {
        self.stale_style = true;
        self
    }

    /// Every read fails as if the node had been removed.
    #[must_use]
    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    fn attached(&self) -> Result<&Self, ElementError> {
        if self.detached {
            Err(ElementError::Stale)
        } else {
            Ok(self)
        }
    }
}

/// A session that serves a fixed list of elements for any page.
#[derive(Debug)]
pub struct ScriptedSession {
    elements: Vec<FakeElement>,
    navigation_error: Option<String>,
    close_error: Option<String>,
    navigated: Mutex<Option<String>>,
    selector: Mutex<Option<String>>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedSession {
    /// Serves `elements`, in order, for every query.
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self {
            elements,
            navigation_error: None,
            close_error: None,
            navigated: Mutex::new(None),
            selector: Mutex::new(None),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Navigation fails with `reason`.
    #[must_use]
    pub fn failing_navigation(mut self, reason: impl Into<String>) -> Self {
        self.navigation_error = Some(reason.into());
        self
    }

    /// Closing fails with `reason`.
    #[must_use]
    pub fn failing_close(mut self, reason: impl Into<String>) -> Self {
        self.close_error = Some(reason.into());
        self
    }

    /// The last URL navigated to.
    pub fn navigated_to(&self) -> Option<String> {
        self.navigated
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The last selector queried.
    pub fn last_selector(&self) -> Option<String> {
        self.selector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times this session (or a clone) was closed.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Clone for ScriptedSession {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            navigation_error: self.navigation_error.clone(),
            close_error: self.close_error.clone(),
            navigated: Mutex::new(None),
            selector: Mutex::new(None),
            closes: Arc::clone(&self.closes),
        }
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), SessionError> {
        if let Some(reason) = &self.navigation_error {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                reason: reason.clone(),
            });
        }
        *self.navigated.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_string());
        Ok(())
    }

    async fn query_elements(&self, selector: &str) -> Result<Vec<FakeElement>, SessionError> {
        *self.selector.lock().unwrap_or_else(PoisonError::into_inner) = Some(selector.to_string());
        Ok(self.elements.clone())
    }

    async fn computed_style(
        &self,
        element: &FakeElement,
        _properties: &[String],
    ) -> Result<HashMap<String, String>, ElementError> {
        let element = element.attached()?;
        if element.stale_style {
            return Err(ElementError::Stale);
        }
        if let Some(delay) = element.style_delay {
            tokio::time::sleep(delay).await;
        }
        element
            .style
            .clone()
            .ok_or_else(|| ElementError::Failed("style script threw".to_string()))
    }

    async fn outer_html(&self, element: &FakeElement) -> Result<Option<String>, ElementError> {
        Ok(element.attached()?.fragment.clone())
    }

    async fn inner_text(&self, element: &FakeElement) -> Result<String, ElementError> {
        Ok(element.attached()?.text.clone())
    }

    async fn count_children(&self, element: &FakeElement) -> Result<usize, ElementError> {
        Ok(element.attached()?.children)
    }

    async fn close(self) -> Result<(), SessionError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        match self.close_error {
            Some(reason) => Err(SessionError::Close(reason)),
            None => Ok(()),
        }
    }
}

/// Hands out clones of a template [`ScriptedSession`] and counts them.
#[derive(Debug)]
pub struct ScriptedProvider {
    template: ScriptedSession,
    acquire_error: Option<String>,
    acquired: AtomicUsize,
}

impl ScriptedProvider {
    /// Hands out clones of `template`.
    pub fn new(template: ScriptedSession) -> Self {
        Self {
            template,
            acquire_error: None,
            acquired: AtomicUsize::new(0),
        }
    }

    /// Every acquisition fails with `reason`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            acquire_error: Some(reason.into()),
            ..Self::new(ScriptedSession::new(Vec::new()))
        }
    }

    /// Sessions handed out so far.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Sessions closed so far.
    pub fn closed(&self) -> usize {
        self.template.close_count()
    }
}

#[async_trait]
impl SessionProvider for ScriptedProvider {
    type Session = ScriptedSession;

    async fn acquire(&self) -> Result<ScriptedSession, SessionError> {
        if let Some(reason) = &self.acquire_error {
            return Err(SessionError::Acquisition(reason.clone()));
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(self.template.clone())
    }
}
