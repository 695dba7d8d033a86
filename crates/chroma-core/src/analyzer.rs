//! The analysis pipeline.
//!
//! ```text
//! navigate → query candidates → per element:
//!     qualify → style signature → dedup → fragment → build record
//! ```
//!
//! Element-level failures skip one element and are logged at debug level.
//! Only session failures abort the request.

use crate::config::{AnalyzerConfig, ConfigError};
use crate::contrast::ContrastEngine;
use crate::error::{AnalyzeError, Result};
use crate::extractor::StyleExtractor;
use crate::filter::{ElementFilter, ElementQueryResult, SeenSignatures};
use crate::luminance::{ConcurrentLuminanceCache, LuminanceCache};
use crate::report::{ColorAnalyzeReport, ReportBuilder};
use crate::session::{BrowserSession, SessionProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs contrast analyses. Cheap to clone; clones share the luminance cache.
#[derive(Debug, Clone)]
pub struct ContrastAnalyzer {
    config: AnalyzerConfig,
    engine: ContrastEngine,
}

impl ContrastAnalyzer {
    /// An analyzer with `config`, memoizing luminance in `cache`.
    ///
    /// # Errors
    ///
    /// Returns the first problem [`AnalyzerConfig::validate`] finds.
    pub fn new(
        config: AnalyzerConfig,
        cache: Arc<dyn LuminanceCache>,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            engine: ContrastEngine::new(cache),
        })
    }

    /// Default policy with a private cache.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            engine: ContrastEngine::new(ConcurrentLuminanceCache::shared()),
        }
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The contrast engine, sharing this analyzer's luminance cache.
    #[must_use]
    pub fn engine(&self) -> &ContrastEngine {
        &self.engine
    }

    /// Analyzes `url` in an already acquired session. The session stays open.
    ///
    /// # Errors
    ///
    /// [`AnalyzeError::BlankUrl`], or a navigation or query failure.
    pub async fn analyze<S: BrowserSession>(
        &self,
        session: &S,
        url: &str,
    ) -> Result<ColorAnalyzeReport> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AnalyzeError::BlankUrl);
        }

        info!("Started to analyze {}", url);
        session.navigate(url).await?;

        let extractor = StyleExtractor::new(&self.config);
        let filter = ElementFilter::new(&self.config);
        let candidates = extractor.candidates(session).await?;

        let mut seen = SeenSignatures::new();
        let mut builder = ReportBuilder::new(
            url,
            self.config.background_property.as_str(),
            self.engine.clone(),
        );

        for (index, candidate) in candidates.iter().enumerate() {
            let element = match filter.qualify(session, candidate).await {
                ElementQueryResult::Ok(element) => element,
                rejected => {
                    debug!("Skipping element #{}: {}", index, rejected.reason());
                    continue;
                }
            };

            let signature = match extractor.style_signature(session, element).await {
                Ok(signature) if signature.is_empty() => {
                    debug!("Skipping element #{}: empty style", index);
                    continue;
                }
                Ok(signature) => signature,
                Err(err) => {
                    debug!("Skipping element #{}: {}", index, err);
                    continue;
                }
            };

            if !seen.first_sighting(&signature) {
                debug!("Skipping element #{}: duplicate style", index);
                continue;
            }

            let fragment = match extractor.fragment(session, element).await {
                Ok(fragment) => fragment,
                Err(err) => {
                    debug!("Skipping element #{}: no fragment ({})", index, err);
                    continue;
                }
            };

            match builder.build_element(&signature, fragment) {
                Ok(record) => builder.push(record),
                Err(err) => debug!("Skipping element #{}: {}", index, err),
            }
        }

        let report = builder.finish();
        info!("{} blocks found and processed", report.len());
        Ok(report)
    }

    /// Acquires a fresh session from `provider`, analyzes `url`, and closes
    /// the session whether or not the analysis succeeded.
    ///
    /// # Errors
    ///
    /// Acquisition failures and anything [`ContrastAnalyzer::analyze`] returns.
    /// A failure to close is logged, not returned.
    pub async fn analyze_url<P: SessionProvider>(
        &self,
        provider: &P,
        url: &str,
    ) -> Result<ColorAnalyzeReport> {
        if url.trim().is_empty() {
            return Err(AnalyzeError::BlankUrl);
        }

        let session = provider.acquire().await?;
        let result = self.analyze(&session, url).await;

        if let Err(err) = session.close().await {
            warn!("{}", err);
        }

        result
    }
}

impl Default for ContrastAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, ScriptedProvider, ScriptedSession};

    #[tokio::test]
    async fn blank_url_never_acquires_a_session() {
        let provider = ScriptedProvider::new(ScriptedSession::new(Vec::new()));
        let err = ContrastAnalyzer::default()
            .analyze_url(&provider, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AnalyzeError::BlankUrl));
        assert_eq!(provider.acquired(), 0);
    }

    #[tokio::test]
    async fn analyze_uses_the_configured_selector() {
        let session = ScriptedSession::new(vec![FakeElement::paragraph("red", "white")]);
        let analyzer = ContrastAnalyzer::default();

        analyzer.analyze(&session, "https://example.com").await.unwrap();

        assert_eq!(session.navigated_to().as_deref(), Some("https://example.com"));
        assert_eq!(session.last_selector(), Some(analyzer.config().selector()));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = AnalyzerConfig::default().with_max_children(0);
        let result = ContrastAnalyzer::new(config, ConcurrentLuminanceCache::shared());
        assert_eq!(result.unwrap_err(), ConfigError::ZeroThreshold("maxChildren"));
    }
}
