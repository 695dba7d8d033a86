//! Enumerating candidate elements and reading their styles.

use crate::config::AnalyzerConfig;
use crate::session::{BrowserSession, ElementError, SessionError};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// The allow-listed, non-empty computed styles of one element.
///
/// Ordered by property name so equality and hashing ignore the order in
/// which the browser reported properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleSignature(BTreeMap<String, String>);

impl StyleSignature {
    /// Keeps the allow-listed entries of `raw` whose values are non-blank.
    #[must_use]
    pub fn from_computed(raw: HashMap<String, String>, config: &AnalyzerConfig) -> Self {
        let entries = raw
            .into_iter()
            .filter(|(property, _)| config.is_captured(property))
            .filter_map(|(property, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| (property, value.to_string()))
            })
            .collect();
        Self(entries)
    }

    /// True when no allow-listed property had a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of captured properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Raw value of `property`.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// `(property, value)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleSignature {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Runs `call`, failing with [`ElementError::Timeout`] once `timeout` elapses.
pub(crate) async fn bounded<T, F>(timeout: Duration, call: F) -> Result<T, ElementError>
where
    F: Future<Output = Result<T, ElementError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .unwrap_or(Err(ElementError::Timeout(timeout)))
}

/// Reads candidates and their style signatures through a [`BrowserSession`].
#[derive(Debug, Clone, Copy)]
pub struct StyleExtractor<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> StyleExtractor<'a> {
    /// An extractor reading the properties allow-listed in `config`.
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// All elements matching the configured candidate selector, in document order.
    ///
    /// # Errors
    ///
    /// Propagates a failed query; the analysis cannot continue without one.
    pub async fn candidates<S: BrowserSession>(
        &self,
        session: &S,
    ) -> Result<Vec<S::Element>, SessionError> {
        let selector = self.config.selector();
        let elements = session.query_elements(&selector).await?;
        debug!("Selector matched {} candidate elements", elements.len());
        Ok(elements)
    }

    /// The element's style signature.
    ///
    /// A stale element is an error so the caller can skip it. Any other
    /// failure, a timeout included, yields an empty signature.
    ///
    /// # Errors
    ///
    /// [`ElementError::Stale`] if the element left the document.
    pub async fn style_signature<S: BrowserSession>(
        &self,
        session: &S,
        element: &S::Element,
    ) -> Result<StyleSignature, ElementError> {
        let call = session.computed_style(element, &self.config.style_properties);
        match bounded(self.config.call_timeout(), call).await {
            Ok(raw) => Ok(StyleSignature::from_computed(raw, self.config)),
            Err(ElementError::Stale) => Err(ElementError::Stale),
            Err(err) => {
                debug!("Style retrieval failed, using empty style: {}", err);
                Ok(StyleSignature::default())
            }
        }
    }

    /// The element's serialized markup.
    ///
    /// # Errors
    ///
    /// Any failure, including a browser that reports no markup, which is
    /// treated as [`ElementError::Stale`].
    pub async fn fragment<S: BrowserSession>(
        &self,
        session: &S,
        element: &S::Element,
    ) -> Result<String, ElementError> {
        bounded(self.config.call_timeout(), session.outer_html(element))
            .await?
            .ok_or(ElementError::Stale)
    }
}
