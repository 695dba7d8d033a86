//! Candidate qualification and signature dedup.

use crate::config::AnalyzerConfig;
use crate::extractor::{StyleSignature, bounded};
use crate::session::BrowserSession;
use std::collections::HashSet;
use tracing::debug;

/// Outcome of qualifying one candidate element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementQueryResult<E> {
    /// The element is a content block worth analyzing.
    Ok(E),
    /// The element could not be read (detached, timed out, or failed).
    Stale,
    /// The element has this many direct children, above the threshold.
    TooManyChildren(usize),
    /// The element renders no visible text.
    Empty,
}

impl<E> ElementQueryResult<E> {
    /// The element, if it qualified.
    pub fn ok(self) -> Option<E> {
        match self {
            ElementQueryResult::Ok(element) => Some(element),
            _ => None,
        }
    }

    /// Short reason for a rejection, used in skip logs.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            ElementQueryResult::Ok(_) => "qualified",
            ElementQueryResult::Stale => "stale element",
            ElementQueryResult::TooManyChildren(_) => "too many children",
            ElementQueryResult::Empty => "no visible text",
        }
    }
}

/// Decides whether a candidate is a content block.
#[derive(Debug, Clone, Copy)]
pub struct ElementFilter<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> ElementFilter<'a> {
    /// A filter applying the thresholds in `config`.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Checks visible text first, then the direct-child count.
    pub async fn qualify<'e, S: BrowserSession>(
        &self,
        session: &S,
        element: &'e S::Element,
    ) -> ElementQueryResult<&'e S::Element> {
        let timeout = self.config.call_timeout();

        let text = match bounded(timeout, session.inner_text(element)).await {
            Ok(text) => text,
            Err(err) => {
                debug!("Could not read element text: {}", err);
                return ElementQueryResult::Stale;
            }
        };
        if text.trim().is_empty() {
            return ElementQueryResult::Empty;
        }

        match bounded(timeout, session.count_children(element)).await {
            Ok(children) if children > self.config.max_children => {
                ElementQueryResult::TooManyChildren(children)
            }
            Ok(_) => ElementQueryResult::Ok(element),
            Err(err) => {
                debug!("Could not count element children: {}", err);
                ElementQueryResult::Stale
            }
        }
    }
}

/// Style signatures already reported during one analysis.
#[derive(Debug, Default)]
pub struct SeenSignatures {
    seen: HashSet<StyleSignature>,
}

impl SeenSignatures {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `signature`, returning true only the first time it is seen.
    pub fn first_sighting(&mut self, signature: &StyleSignature) -> bool {
        if self.seen.contains(signature) {
            return false;
        }
        self.seen.insert(signature.clone())
    }

    /// Number of distinct signatures recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True before the first sighting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, ScriptedSession};

    fn session() -> ScriptedSession {
        ScriptedSession::new(Vec::new())
    }

    #[tokio::test]
    async fn blank_text_is_empty() {
        let config = AnalyzerConfig::default();
        let element = FakeElement::new("<p> </p>").with_text("  \n");
        let result = ElementFilter::new(&config).qualify(&session(), &element).await;
        assert_eq!(result, ElementQueryResult::Empty);
    }

    #[tokio::test]
    async fn child_threshold_is_inclusive() {
        let config = AnalyzerConfig::default().with_max_children(5);
        let filter = ElementFilter::new(&config);

        let at_limit = FakeElement::new("<div>..</div>").with_children(5);
        assert!(filter.qualify(&session(), &at_limit).await.ok().is_some());

        let over = FakeElement::new("<div>..</div>").with_children(6);
        assert_eq!(
            filter.qualify(&session(), &over).await,
            ElementQueryResult::TooManyChildren(6)
        );
    }

    #[tokio::test]
    async fn detached_elements_are_stale() {
        let config = AnalyzerConfig::default();
        let element = FakeElement::new("<p>gone</p>").detached();
        let result = ElementFilter::new(&config).qualify(&session(), &element).await;
        assert_eq!(result, ElementQueryResult::Stale);
        assert_eq!(result.reason(), "stale element");
    }

    #[test]
    fn first_sighting_wins() {
        let mut seen = SeenSignatures::new();
        let a: StyleSignature = [("color", "red")].into_iter().collect();
        let b: StyleSignature = [("color", "blue")].into_iter().collect();

        assert!(seen.first_sighting(&a));
        assert!(!seen.first_sighting(&a));
        assert!(seen.first_sighting(&b));
        assert_eq!(seen.len(), 2);
    }
}
