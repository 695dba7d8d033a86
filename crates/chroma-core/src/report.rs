//! Per-element records and the aggregated report.

use crate::color::{RgbColor, parse_color};
use crate::contrast::{ContrastEngine, WcagLevel};
use crate::extractor::StyleSignature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// The element's background is missing, unparsable, or fully transparent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no usable background ({})", .value.as_deref().unwrap_or("absent"))]
pub struct InvalidBackground {
    /// The raw background value, if one was captured.
    pub value: Option<String>,
}

/// One analyzed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalyzeElement {
    /// Allow-listed properties whose value parsed as a colour.
    pub styles: BTreeMap<String, RgbColor>,
    /// Allow-listed properties kept as text (widths, shorthands, shadows).
    pub other: BTreeMap<String, String>,
    /// Contrast of each colour property against the background.
    pub contrast: BTreeMap<String, f64>,
    /// The element's outer HTML.
    pub fragment: String,
}

impl ColorAnalyzeElement {
    /// The lowest contrast ratio in the element, if any property was scored.
    #[must_use]
    pub fn min_contrast(&self) -> Option<f64> {
        self.contrast.values().copied().reduce(f64::min)
    }

    /// WCAG band of the weakest property.
    #[must_use]
    pub fn worst_level(&self) -> Option<WcagLevel> {
        self.min_contrast().map(WcagLevel::from_ratio)
    }
}

/// Everything found on one page, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalyzeReport {
    /// The analyzed URL.
    pub url: String,
    /// One record per distinct style, in document order.
    pub elements: Vec<ColorAnalyzeElement>,
}

impl ColorAnalyzeReport {
    /// Number of reported elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no element qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements whose weakest property is below WCAG AA.
    pub fn low_contrast(&self) -> impl Iterator<Item = &ColorAnalyzeElement> {
        self.elements
            .iter()
            .filter(|e| e.worst_level().is_some_and(WcagLevel::is_low_contrast))
    }
}

/// Turns style signatures into report records.
#[derive(Debug)]
pub struct ReportBuilder {
    engine: ContrastEngine,
    background_property: String,
    report: ColorAnalyzeReport,
}

impl ReportBuilder {
    /// Starts an empty report for `url`, judging contrast against
    /// `background_property`.
    pub fn new(
        url: impl Into<String>,
        background_property: impl Into<String>,
        engine: ContrastEngine,
    ) -> Self {
        Self {
            engine,
            background_property: background_property.into(),
            report: ColorAnalyzeReport {
                url: url.into(),
                elements: Vec::new(),
            },
        }
    }

    /// Splits `signature` into colour and text styles and scores the colours.
    ///
    /// # Errors
    ///
    /// [`InvalidBackground`] when the background property is absent,
    /// unparsable, or fully transparent.
    pub fn build_element(
        &self,
        signature: &StyleSignature,
        fragment: String,
    ) -> Result<ColorAnalyzeElement, InvalidBackground> {
        let mut styles = BTreeMap::new();
        let mut other = BTreeMap::new();
        for (property, value) in signature.iter() {
            match parse_color(value) {
                Ok(color) => {
                    styles.insert(property.to_string(), color);
                }
                Err(_) => {
                    other.insert(property.to_string(), value.to_string());
                }
            }
        }

        let background = styles
            .get(&self.background_property)
            .copied()
            .unwrap_or(RgbColor::DEFAULT);
        if background.is_default() {
            return Err(InvalidBackground {
                value: signature.get(&self.background_property).map(str::to_string),
            });
        }

        let contrast = self
            .engine
            .evaluate_contrast(&styles, &background, &self.background_property);

        Ok(ColorAnalyzeElement {
            styles,
            other,
            contrast,
            fragment,
        })
    }

    /// Appends a built element.
    pub fn push(&mut self, element: ColorAnalyzeElement) {
        self.report.elements.push(element);
    }

    /// Number of elements appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.report.len()
    }

    /// True until the first element is pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.report.is_empty()
    }

    /// The finished report.
    #[must_use]
    pub fn finish(self) -> ColorAnalyzeReport {
        self.report
    }
}
