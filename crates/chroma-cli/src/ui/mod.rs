//! Terminal UI: status messages, a spinner, and the report table.
//!
//! Status output goes to stderr; the report itself goes to stdout.

mod format;
mod messages;
mod spinner;

pub use format::{format_duration, format_ratio, print_report, summarize_fragment};
pub use messages::{info, success, warning};
pub use spinner::Spinner;

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Apply the color decision to every output path (owo-colors and console).
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    owo_colors::set_override(enabled);
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}
