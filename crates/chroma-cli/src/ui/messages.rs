//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Stream::Stderr};

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".if_supports_color(Stderr, |t| t.green()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".if_supports_color(Stderr, |t| t.blue()), message);
}

/// Print a warning message to stderr.
///
/// ```no_run
/// use chroma_cli::ui::warning;
///
/// warning("3 elements are below WCAG AA");
/// ```
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |t| t.yellow()),
        message.if_supports_color(Stderr, |t| t.yellow())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        // These should not panic
        success("Success message");
        info("Info message");
        warning("Warning message");
    }
}
