//! Command implementations for the chroma CLI.
//!
//! - [`analyze`] - Analyze one page
//! - [`serve`] - HTTP analysis service
//! - [`config`] - Print or check the effective configuration
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments plus the global `--config` path.

pub mod analyze;
pub mod config;
pub mod serve;

pub use analyze::execute as analyze_execute;
pub use config::execute as config_execute;
pub use serve::execute as serve_execute;
