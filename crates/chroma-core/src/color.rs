//! RGB colour values and CSS colour-string parsing.
//!
//! Browsers report computed colours as `rgb()`/`rgba()` strings, but the parser
//! accepts any CSS colour syntax a caller may hand in (named, hex, `hsl()`).
//!
//! A colour carries an 8-bit alpha. Everything downstream works with the
//! *effective* channels: the colour composited onto an opaque white canvas.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Returned when a string is not a CSS colour.
///
/// Allow-listed properties such as `border-top-width` or the `background`
/// shorthand routinely produce this; callers keep those values as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a CSS colour: {reason}")]
pub struct UnparsableColor {
    /// The rejected input.
    pub value: String,
    /// Parser diagnostic.
    pub reason: String,
}

/// An sRGB colour with 8-bit channels and alpha.
///
/// Equality and hashing use the effective (white-composited) channels, so
/// `rgba(0, 0, 0, 0)` and `rgb(255, 255, 255)` compare equal. Use
/// [`RgbColor::is_default`] to ask whether a colour is transparent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RgbColor {
    red: u8,
    green: u8,
    blue: u8,
    #[serde(default = "opaque")]
    alpha: u8,
}

const fn opaque() -> u8 {
    u8::MAX
}

impl RgbColor {
    /// Fully transparent black: the "no usable background" sentinel.
    pub const DEFAULT: RgbColor = RgbColor::with_alpha(0, 0, 0, 0);

    /// Opaque black.
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    /// Opaque white.
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);

    /// An opaque colour.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::with_alpha(red, green, blue, u8::MAX)
    }

    /// A colour with explicit alpha (0 = transparent, 255 = opaque).
    #[must_use]
    pub const fn with_alpha(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Builds a colour from wide integers, clamping each component to `0..=255`.
    #[must_use]
    pub fn clamped(red: i64, green: i64, blue: i64, alpha: i64) -> Self {
        let clamp = |v: i64| u8::try_from(v.clamp(0, 255)).unwrap_or(u8::MAX);
        Self::with_alpha(clamp(red), clamp(green), clamp(blue), clamp(alpha))
    }

    /// Raw red channel.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Raw green channel.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Raw blue channel.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Raw alpha.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// True when the colour is fully transparent, i.e. paints nothing.
    ///
    /// Every fully transparent colour is treated as [`RgbColor::DEFAULT`]:
    /// computed styles report an unset background as `rgba(0, 0, 0, 0)`.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.alpha == 0
    }

    /// The displayed channels after compositing onto white.
    #[must_use]
    pub fn effective(&self) -> (u8, u8, u8) {
        (
            effective_channel(self.red, self.alpha),
            effective_channel(self.green, self.alpha),
            effective_channel(self.blue, self.alpha),
        )
    }
}

impl PartialEq for RgbColor {
    fn eq(&self, other: &Self) -> bool {
        self.effective() == other.effective()
    }
}

impl Eq for RgbColor {}

impl Hash for RgbColor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.effective().hash(state);
    }
}

/// Composites one channel onto white: `round(c * a + 255 * (1 - a))`, `a = alpha / 255`.
///
/// Evaluated as `(c * alpha + 255 * (255 - alpha)) / 255`, the same value
/// without the rounding noise of dividing first. Ties round half-up
/// (`f64::round` on a non-negative value); with integer inputs the
/// fractional part is `k / 255`, so an exact tie cannot occur.
#[must_use]
pub fn effective_channel(channel: u8, alpha: u8) -> u8 {
    let c = f64::from(channel);
    let a = f64::from(alpha);
    let blended = (c * a + 255.0 * (255.0 - a)) / 255.0;
    // blended is a convex combination of `channel` and 255
    blended.round().clamp(0.0, 255.0) as u8
}

/// Parses a CSS colour string.
///
/// Accepts named colours, `transparent`, hex, `rgb()`/`rgba()` and
/// `hsl()`/`hsla()`. Alpha is normalized to 8 bits.
///
/// # Errors
///
/// [`UnparsableColor`] when the input is empty or not a colour.
pub fn parse_color(raw: &str) -> Result<RgbColor, UnparsableColor> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UnparsableColor {
            value: raw.to_string(),
            reason: "empty value".to_string(),
        });
    }

    // csscolorparser also takes hex digits without the `#`; CSS does not
    if trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(UnparsableColor {
            value: raw.to_string(),
            reason: "hex colour without leading '#'".to_string(),
        });
    }

    let color = csscolorparser::parse(trimmed).map_err(|e| UnparsableColor {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    let [red, green, blue, alpha] = color.to_rgba8();
    Ok(RgbColor::with_alpha(red, green, blue, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_transparent_black_composites_to_127() {
        let color = RgbColor::with_alpha(0, 0, 0, 128);
        assert_eq!(effective_channel(0, 128), 127);
        assert_eq!(color.effective(), (127, 127, 127));
    }

    #[test]
    fn opaque_and_transparent_extremes() {
        assert_eq!(effective_channel(42, 255), 42);
        assert_eq!(effective_channel(42, 0), 255);
        assert_eq!(RgbColor::DEFAULT.effective(), (255, 255, 255));
    }

    #[test]
    fn rounding_is_half_up_on_nearest_values() {
        // 200 at alpha 100: (20000 + 39525) / 255 = 233.43 -> 233
        assert_eq!(effective_channel(200, 100), 233);
        // 1 at alpha 1: (1 + 64770) / 255 = 254.004 -> 254
        assert_eq!(effective_channel(1, 1), 254);
        // 10 at alpha 127: (1270 + 32640) / 255 = 132.98 -> 133
        assert_eq!(effective_channel(10, 127), 133);
    }

    #[test]
    fn equality_uses_effective_channels() {
        assert_eq!(RgbColor::DEFAULT, RgbColor::WHITE);
        assert_eq!(RgbColor::with_alpha(9, 9, 9, 0), RgbColor::WHITE);
        assert_ne!(RgbColor::BLACK, RgbColor::WHITE);
        assert!(RgbColor::DEFAULT.is_default());
        assert!(!RgbColor::WHITE.is_default());
    }

    #[test]
    fn clamped_saturates_out_of_range_components() {
        let color = RgbColor::clamped(-20, 300, 128, 999);
        assert_eq!(
            (color.red(), color.green(), color.blue(), color.alpha()),
            (0, 255, 128, 255)
        );
    }

    #[test]
    fn parses_browser_computed_forms() {
        assert_eq!(parse_color("rgb(255, 0, 0)").unwrap(), RgbColor::new(255, 0, 0));

        let translucent = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(translucent.red(), 0);
        assert!((127..=128).contains(&translucent.alpha()));

        let unset = parse_color("rgba(0, 0, 0, 0)").unwrap();
        assert!(unset.is_default());
    }

    #[test]
    fn parses_named_hex_and_hsl() {
        assert_eq!(parse_color("red").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(parse_color("white").unwrap(), RgbColor::WHITE);
        assert_eq!(parse_color("#00f").unwrap(), RgbColor::new(0, 0, 255));
        assert_eq!(parse_color("#336699").unwrap(), RgbColor::new(0x33, 0x66, 0x99));
        assert_eq!(parse_color("hsl(120, 100%, 50%)").unwrap(), RgbColor::new(0, 255, 0));
        assert!(parse_color("hsla(0, 100%, 50%, 0)").unwrap().is_default());
        assert!(parse_color("transparent").unwrap().is_default());
    }

    #[test]
    fn rejects_non_colour_style_values() {
        for raw in [
            "",
            "   ",
            "0px",
            "2.5px",
            "none",
            "100",
            "abc",
            "fff",
            "rgba(0, 0, 0, 0) none repeat scroll 0% 0% / auto padding-box border-box",
            "rgb(0, 0, 0) 1px 1px 2px",
        ] {
            let err = parse_color(raw).expect_err(raw);
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn serializes_with_channel_names() {
        let json = serde_json::to_value(RgbColor::with_alpha(1, 2, 3, 4)).unwrap();
        assert_eq!(json, serde_json::json!({"red": 1, "green": 2, "blue": 3, "alpha": 4}));

        let back: RgbColor = serde_json::from_str(r#"{"red": 1, "green": 2, "blue": 3}"#).unwrap();
        assert_eq!(back.alpha(), 255);
    }

    proptest! {
        #[test]
        fn effective_channel_stays_between_channel_and_white(channel: u8, alpha: u8) {
            let eff = effective_channel(channel, alpha);
            prop_assert!(eff >= channel);
        }

        #[test]
        fn opaque_colours_are_unchanged(r: u8, g: u8, b: u8) {
            prop_assert_eq!(RgbColor::new(r, g, b).effective(), (r, g, b));
        }
    }
}
