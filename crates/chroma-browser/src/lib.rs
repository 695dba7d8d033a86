//! # chroma-browser
//!
//! Chrome session plumbing for chroma, built on chromiumoxide.
//!
//! The crate launches (or attaches to) a browser, opens a tab, navigates, and
//! reads element-level data the contrast pipeline needs: computed styles,
//! rendered text, outer HTML and child counts.
//!
//! ## Architecture
//!
//! - **ChromeBrowser**: owns the browser process or remote connection
//! - **Page**: a tab with navigation, evaluation and selector queries
//! - **ElementRef**: element-scoped reads with stale-node detection
//! - **WaitConfig**: polling strategy for page readiness
//!
//! ## Example Usage
//!
//! ```ignore
//! use chroma_browser::{BrowserSettings, ChromeBrowser};
//!
//! let browser = ChromeBrowser::launch(BrowserSettings::default()).await?;
//! let page = browser.new_page().await?;
//! page.navigate("https://example.com").await?;
//!
//! for element in page.query_selector_all("body p").await? {
//!     let styles = element.computed_style(&["color".to_string()]).await?;
//!     println!("{styles:?}");
//! }
//!
//! page.close().await?;
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover script generation, error classification and waits.
//! Tests that need a real Chrome are `#[ignore]`; run them with
//! `cargo test -p chroma-browser -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod element;
pub mod error;
pub mod page;
pub mod wait;

pub use browser::{BrowserOrigin, BrowserSettings, ChromeBrowser};
pub use element::ElementRef;
pub use error::{BrowserError, Result};
pub use page::Page;
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig};
