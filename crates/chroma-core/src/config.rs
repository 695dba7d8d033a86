//! Candidate-selection policy and property allow-list.
//!
//! Everything that decides *which* elements and *which* properties get
//! analyzed lives in one versioned struct so that tuning the heuristic never
//! means editing the pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Schema version of [`AnalyzerConfig`].
pub const CONFIG_VERSION: u32 = 2;

/// Default ceiling on direct children. Larger elements are containers, not content blocks.
pub const DEFAULT_MAX_CHILDREN: usize = 5;

/// Default per-call browser timeout.
pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 10_000;

/// The property that supplies the backdrop for every contrast score.
pub const BACKGROUND_PROPERTY: &str = "background-color";

/// Tags whose presence as a direct child marks a content block.
pub const DEFAULT_CONTENT_TAGS: &[&str] = &["h1", "h2", "h3", "p", "ul", "ol", "span", "a"];

/// Tags never analyzed.
pub const DEFAULT_EXCLUDED_TAGS: &[&str] = &["script", "style", "link"];

/// Computed-style properties captured per element.
pub const DEFAULT_STYLE_PROPERTIES: &[&str] = &[
    "color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "background",
    "background-color",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "box-shadow",
    "text-shadow",
];

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A list that must be non-empty was empty.
    #[error("'{0}' must contain at least one entry")]
    EmptyList(&'static str),

    /// A threshold that must be positive was zero.
    #[error("'{0}' must be greater than zero")]
    ZeroThreshold(&'static str),

    /// The background property is not captured, so nothing could be scored.
    #[error("background property '{0}' is not in styleProperties")]
    BackgroundNotCaptured(String),

    /// A tag or property name contains characters that would corrupt the selector.
    #[error("'{value}' is not a valid {kind} name")]
    InvalidName {
        /// "tag" or "property".
        kind: &'static str,
        /// The rejected name.
        value: String,
    },

    /// The config was written for a newer schema.
    #[error("config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the config.
        found: u32,
        /// Highest version this build understands.
        supported: u32,
    },
}

/// Analysis policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Schema version.
    pub version: u32,

    /// An element qualifies if at least one of these is a direct child.
    pub content_tags: Vec<String>,

    /// Elements with these tags are never candidates.
    pub excluded_tags: Vec<String>,

    /// Elements with more direct children than this are skipped.
    pub max_children: usize,

    /// Properties captured into each element's style signature.
    pub style_properties: Vec<String>,

    /// Property used as the contrast backdrop.
    pub background_property: String,

    /// Timeout for each element-level browser call, in milliseconds.
    pub call_timeout_ms: u64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            content_tags: to_strings(DEFAULT_CONTENT_TAGS),
            excluded_tags: to_strings(DEFAULT_EXCLUDED_TAGS),
            max_children: DEFAULT_MAX_CHILDREN,
            style_properties: to_strings(DEFAULT_STYLE_PROPERTIES),
            background_property: BACKGROUND_PROPERTY.to_string(),
            call_timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
        }
    }
}

impl AnalyzerConfig {
    /// Replaces the child-count ceiling.
    #[must_use]
    pub fn with_max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    /// Replaces the per-call timeout.
    #[must_use]
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Per-call timeout as a `Duration`.
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// True if `property` belongs to the allow-list.
    #[must_use]
    pub fn is_captured(&self, property: &str) -> bool {
        self.style_properties.iter().any(|p| p == property)
    }

    /// The CSS selector that enumerates candidate elements.
    ///
    /// ```
    /// use chroma_core::AnalyzerConfig;
    ///
    /// let mut config = AnalyzerConfig::default();
    /// config.content_tags = vec!["p".into(), "a".into()];
    /// config.excluded_tags = vec!["script".into()];
    /// assert_eq!(
    ///     config.selector(),
    ///     "body *:not(script):not(:empty):has(> p, > a)"
    /// );
    /// ```
    #[must_use]
    pub fn selector(&self) -> String {
        let excluded: String = self
            .excluded_tags
            .iter()
            .map(|tag| format!(":not({tag})"))
            .collect();
        let children = self
            .content_tags
            .iter()
            .map(|tag| format!("> {tag}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("body *{excluded}:not(:empty):has({children})")
    }

    /// Checks the config for values that would make analysis meaningless.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        if self.content_tags.is_empty() {
            return Err(ConfigError::EmptyList("contentTags"));
        }
        if self.style_properties.is_empty() {
            return Err(ConfigError::EmptyList("styleProperties"));
        }
        if self.max_children == 0 {
            return Err(ConfigError::ZeroThreshold("maxChildren"));
        }
        if self.call_timeout_ms == 0 {
            return Err(ConfigError::ZeroThreshold("callTimeoutMs"));
        }
        for tag in self.content_tags.iter().chain(&self.excluded_tags) {
            if !is_css_ident(tag) {
                return Err(ConfigError::InvalidName {
                    kind: "tag",
                    value: tag.clone(),
                });
            }
        }
        for property in &self.style_properties {
            if !is_css_ident(property) {
                return Err(ConfigError::InvalidName {
                    kind: "property",
                    value: property.clone(),
                });
            }
        }
        if !self.is_captured(&self.background_property) {
            return Err(ConfigError::BackgroundNotCaptured(
                self.background_property.clone(),
            ));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn is_css_ident(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
