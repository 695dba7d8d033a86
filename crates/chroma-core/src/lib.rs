//! # chroma-core
//!
//! Colour-contrast analysis of live web pages.
//!
//! Given a URL, the analyzer loads the page in a browser, picks out the
//! elements that look like content blocks, reads their computed colours and
//! reports the WCAG contrast of each colour against the element's background.
//! Elements that share a style are reported once.
//!
//! ## Architecture
//!
//! - **color**: CSS colour parsing and alpha compositing onto white
//! - **luminance / contrast**: memoized WCAG luminance and contrast ratios
//! - **session**: the [`BrowserSession`] seam, with a Chrome implementation
//! - **extractor / filter**: candidate enumeration, qualification, dedup
//! - **report**: per-element records and the page report
//! - **analyzer**: the pipeline tying it together
//!
//! ## Example Usage
//!
//! ```ignore
//! use chroma_core::{ChromeSessionProvider, ContrastAnalyzer};
//!
//! let analyzer = ContrastAnalyzer::default();
//! let provider = ChromeSessionProvider::default();
//! let report = analyzer.analyze_url(&provider, "https://example.com").await?;
//!
//! for element in report.low_contrast() {
//!     println!("{:.2} {}", element.min_contrast().unwrap_or(21.0), element.fragment);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod chrome;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod luminance;
pub mod report;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use analyzer::ContrastAnalyzer;
pub use chrome::{ChromeSession, ChromeSessionProvider};
pub use color::{RgbColor, UnparsableColor, effective_channel, parse_color};
pub use config::{AnalyzerConfig, CONFIG_VERSION, ConfigError, DEFAULT_MAX_CHILDREN};
pub use contrast::{ContrastEngine, WcagLevel};
pub use error::{AnalyzeError, Result};
pub use extractor::{StyleExtractor, StyleSignature};
pub use filter::{ElementFilter, ElementQueryResult, SeenSignatures};
pub use luminance::{ConcurrentLuminanceCache, LuminanceCache, RgbKey, relative_luminance};
pub use report::{ColorAnalyzeElement, ColorAnalyzeReport, InvalidBackground, ReportBuilder};
pub use session::{BrowserSession, ElementError, SessionError, SessionProvider};
