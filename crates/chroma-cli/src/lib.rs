//! chroma CLI - WCAG colour-contrast analysis for live web pages.
//!
//! This crate exposes `chroma-core` through a command-line interface and a
//! small HTTP service.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - `analyze`, `serve`, `config`
//! - [`config`] - figment-based configuration loading
//! - [`error`] - error types and miette conversion
//! - [`logger`] - tracing setup
//! - [`server`] - axum routes for `chroma serve`
//! - [`ui`] - spinner, status messages, report table
//!
//! # Example
//!
//! ```rust
//! use chroma_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod server;
pub mod ui;

pub use error::{CliError, ConfigError, Result};
