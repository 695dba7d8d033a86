//! Miette diagnostic conversion for CLI errors.

use crate::error::CliError;
use ::miette::Report;
use chroma_core::{AnalyzeError, SessionError};

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Analyze(e) => analyze_error_to_miette(e),
        CliError::Config(e) => ::miette::miette!("Configuration error: {}", e),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert AnalyzeError to miette Report, adding hints for browser failures
pub fn analyze_error_to_miette(err: AnalyzeError) -> Report {
    match err {
        AnalyzeError::Session(SessionError::Acquisition(reason)) => ::miette::miette!(
            "Could not start or reach a browser: {}\n\nHint: Install Chrome/Chromium, set browser.chromePath, or attach to a running browser with --remote-url",
            reason
        ),
        AnalyzeError::Session(SessionError::Navigation { url, reason }) => ::miette::miette!(
            "Could not load {}: {}\n\nHint: Check that the URL is reachable from the browser",
            url,
            reason
        ),
        other => ::miette::miette!("Analysis failed: {}", other),
    }
}
