//! WCAG contrast ratios between colours.

use crate::color::RgbColor;
use crate::luminance::{ConcurrentLuminanceCache, LuminanceCache, cached_luminance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Computes contrast ratios through a shared luminance cache.
///
/// Cloning is cheap; clones share the cache.
#[derive(Clone)]
pub struct ContrastEngine {
    cache: Arc<dyn LuminanceCache>,
}

impl ContrastEngine {
    /// An engine backed by `cache`.
    pub fn new(cache: Arc<dyn LuminanceCache>) -> Self {
        Self { cache }
    }

    /// Luminance of the colour as displayed on white.
    #[must_use]
    pub fn luminance(&self, color: &RgbColor) -> f64 {
        cached_luminance(self.cache.as_ref(), color.effective())
    }

    /// `(L_max + 0.05) / (L_min + 0.05)`, in `[1, 21]`. Symmetric in its arguments.
    #[must_use]
    pub fn contrast_ratio(&self, a: &RgbColor, b: &RgbColor) -> f64 {
        ratio_of_luminances(self.luminance(a), self.luminance(b))
    }

    /// Scores every colour property against `background`.
    ///
    /// `background_property` itself is never scored.
    #[must_use]
    pub fn evaluate_contrast(
        &self,
        color_styles: &BTreeMap<String, RgbColor>,
        background: &RgbColor,
        background_property: &str,
    ) -> BTreeMap<String, f64> {
        color_styles
            .iter()
            .filter(|(property, _)| property.as_str() != background_property)
            .map(|(property, color)| (property.clone(), self.contrast_ratio(color, background)))
            .collect()
    }
}

impl Default for ContrastEngine {
    fn default() -> Self {
        Self::new(ConcurrentLuminanceCache::shared())
    }
}

impl fmt::Debug for ContrastEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContrastEngine").finish_non_exhaustive()
    }
}

/// Contrast ratio of two relative luminances.
#[must_use]
pub fn ratio_of_luminances(l1: f64, l2: f64) -> f64 {
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG 2.x conformance band for normal-size text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WcagLevel {
    /// Below 3:1.
    Fail,
    /// At least 3:1; acceptable for large text only.
    AaLarge,
    /// At least 4.5:1.
    Aa,
    /// At least 7:1.
    Aaa,
}

impl WcagLevel {
    /// Classifies a contrast ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            WcagLevel::Aaa
        } else if ratio >= 4.5 {
            WcagLevel::Aa
        } else if ratio >= 3.0 {
            WcagLevel::AaLarge
        } else {
            WcagLevel::Fail
        }
    }

    /// True when normal text at this level is below AA.
    #[must_use]
    pub fn is_low_contrast(self) -> bool {
        self < WcagLevel::Aa
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WcagLevel::Fail => "fail",
            WcagLevel::AaLarge => "AA large",
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn engine() -> ContrastEngine {
        ContrastEngine::default()
    }

    #[test]
    fn black_on_white_is_21() {
        let ratio = engine().contrast_ratio(&RgbColor::BLACK, &RgbColor::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9, "got {ratio}");
    }

    #[test]
    fn red_on_white_is_about_4() {
        let ratio = engine().contrast_ratio(&RgbColor::new(255, 0, 0), &RgbColor::WHITE);
        assert!((ratio - 3.998_476_770_753_998).abs() < 1e-9, "got {ratio}");
    }

    #[test]
    fn translucent_colours_are_scored_as_displayed() {
        let e = engine();
        let half_black = RgbColor::with_alpha(0, 0, 0, 128);
        let grey = RgbColor::new(127, 127, 127);
        assert_eq!(
            e.contrast_ratio(&half_black, &RgbColor::WHITE).to_bits(),
            e.contrast_ratio(&grey, &RgbColor::WHITE).to_bits()
        );
    }

    #[test]
    fn evaluate_contrast_skips_the_background_property() {
        let mut styles = BTreeMap::new();
        styles.insert("color".to_string(), RgbColor::BLACK);
        styles.insert("border-top-color".to_string(), RgbColor::WHITE);
        styles.insert("background-color".to_string(), RgbColor::WHITE);

        let contrast = engine().evaluate_contrast(&styles, &RgbColor::WHITE, "background-color");

        assert_eq!(contrast.len(), 2);
        assert!(!contrast.contains_key("background-color"));
        assert!((contrast["color"] - 21.0).abs() < 1e-9);
        assert!((contrast["border-top-color"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn engine_clones_share_the_cache() {
        let cache = ConcurrentLuminanceCache::shared();
        let a = ContrastEngine::new(cache.clone());
        let b = a.clone();

        assert!(a.luminance(&RgbColor::new(1, 2, 3)) < 0.01);
        assert!(b.luminance(&RgbColor::new(4, 5, 6)) < 0.01);

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn wcag_levels() {
        assert_eq!(WcagLevel::from_ratio(21.0), WcagLevel::Aaa);
        assert_eq!(WcagLevel::from_ratio(4.5), WcagLevel::Aa);
        assert_eq!(WcagLevel::from_ratio(3.998), WcagLevel::AaLarge);
        assert_eq!(WcagLevel::from_ratio(1.0), WcagLevel::Fail);
        assert!(WcagLevel::AaLarge.is_low_contrast());
        assert!(!WcagLevel::Aa.is_low_contrast());
        assert_eq!(WcagLevel::AaLarge.to_string(), "AA large");
    }

    proptest! {
        #[test]
        fn ratio_is_symmetric_and_bounded(
            r1: u8, g1: u8, b1: u8, a1: u8,
            r2: u8, g2: u8, b2: u8, a2: u8,
        ) {
            let e = engine();
            let x = RgbColor::with_alpha(r1, g1, b1, a1);
            let y = RgbColor::with_alpha(r2, g2, b2, a2);
            let xy = e.contrast_ratio(&x, &y);
            prop_assert_eq!(xy.to_bits(), e.contrast_ratio(&y, &x).to_bits());
            prop_assert!((1.0..=21.0 + 1e-9).contains(&xy));
            prop_assert_eq!(e.contrast_ratio(&x, &x), 1.0);
        }
    }
}
