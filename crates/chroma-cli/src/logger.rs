//! Logging infrastructure for the chroma CLI.
//!
//! Logs go to stderr so that `chroma analyze --format json` keeps stdout
//! clean for the report.
//!
//! # Example
//!
//! ```rust,no_run
//! use chroma_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Started to analyze {}", "https://example.com");
//! debug!("Skipping element #{}: {}", 3, "duplicate style");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`: debug for chroma crates and HTTP tracing.
pub const VERBOSE_FILTER: &str = "chroma=debug,tower_http=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "chroma=error";

/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "chroma=info,tower_http=info";

/// Picks the filter directives for the given flags.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for chroma crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable
/// 4. Default: INFO for chroma crates
///
/// `chroma` matches every `chroma_*` target by prefix.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // try_init: tests and embedders may have installed a subscriber already
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
