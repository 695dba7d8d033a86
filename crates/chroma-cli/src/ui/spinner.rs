//! Spinner shown while a page is being analyzed.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream::Stderr};
use std::time::Duration;

/// Spinner for tasks without known duration.
///
/// Hidden automatically when stderr is not a terminal.
///
/// ```no_run
/// use chroma_cli::ui::Spinner;
///
/// let spinner = Spinner::new("Analyzing https://example.com...");
/// spinner.finish("12 elements analyzed");
/// ```
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create and start a new spinner.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["◐", "◓", "◑", "◒", "●"]);
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// A spinner that draws nothing, for `--quiet` and JSON output.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    /// Update spinner message while it's running.
    pub fn set_message(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    /// Finish spinner with a green checkmark.
    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            "✓".if_supports_color(Stderr, |t| t.green()),
            message
        ));
    }

    /// Finish spinner with a red X.
    pub fn fail(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            "✗".if_supports_color(Stderr, |t| t.red()),
            message
        ));
    }
}
