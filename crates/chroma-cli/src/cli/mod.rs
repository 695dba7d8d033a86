//! Command-line interface definition for chroma.
//!
//! # Command Structure
//!
//! - `chroma analyze <URL>` - Analyze one page and print the report
//! - `chroma serve` - Run the HTTP analysis service
//! - `chroma config` - Print the effective configuration

mod commands;
pub mod enums;
mod validation;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{AnalyzeArgs, Command, ConfigArgs, ServeArgs};
pub use enums::*;
pub use validation::parse_url;

/// chroma - WCAG colour-contrast analysis for live web pages
#[derive(Parser, Debug)]
#[command(
    name = "chroma",
    version,
    about = "WCAG colour-contrast analysis for live web pages",
    long_about = "chroma loads a page in Chrome, finds the elements that hold content,\n\
                  reads their computed colours and reports the WCAG contrast ratio of\n\
                  each colour against the element's background."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every element the analyzer skips and why.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a JSON config file (default: ./chroma.config.json if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
