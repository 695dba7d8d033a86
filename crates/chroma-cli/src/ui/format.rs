//! Formatting for the report table.

use chroma_core::{ColorAnalyzeElement, ColorAnalyzeReport, WcagLevel};
use console::Term;
use owo_colors::{OwoColorize, Stream::Stdout};
use std::io::{self, Write};
use std::time::Duration;

/// Longest fragment excerpt shown per element.
const FRAGMENT_WIDTH: usize = 72;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use chroma_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Format a contrast ratio the way WCAG tools print it.
///
/// ```
/// use chroma_cli::ui::format_ratio;
///
/// assert_eq!(format_ratio(21.0), "21.00:1");
/// assert_eq!(format_ratio(3.998_476_770_753_998), "4.00:1");
/// ```
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}:1", ratio)
}

/// One-line excerpt of an HTML fragment: whitespace collapsed, truncated
/// on a character boundary with a trailing ellipsis.
pub fn summarize_fragment(fragment: &str, max_chars: usize) -> String {
    let collapsed = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut excerpt: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    excerpt.push('…');
    excerpt
}

fn level_label(level: WcagLevel) -> String {
    let label = level.to_string();
    match level {
        WcagLevel::Aaa | WcagLevel::Aa => {
            label.if_supports_color(Stdout, |t| t.green()).to_string()
        }
        WcagLevel::AaLarge => label.if_supports_color(Stdout, |t| t.yellow()).to_string(),
        WcagLevel::Fail => label.if_supports_color(Stdout, |t| t.red()).to_string(),
    }
}

fn write_element<W: Write>(
    out: &mut W,
    index: usize,
    element: &ColorAnalyzeElement,
) -> io::Result<()> {
    let excerpt = summarize_fragment(&element.fragment, FRAGMENT_WIDTH);
    writeln!(
        out,
        "  {} {}",
        format!("#{}", index + 1).if_supports_color(Stdout, |t| t.bold()),
        excerpt.if_supports_color(Stdout, |t| t.dimmed())
    )?;

    let width = element.contrast.keys().map(String::len).max().unwrap_or(0);
    for (property, ratio) in &element.contrast {
        writeln!(
            out,
            "      {:<width$}  {:>8}  {}",
            property,
            format_ratio(*ratio),
            level_label(WcagLevel::from_ratio(*ratio)),
        )?;
    }
    Ok(())
}

/// Write the report table to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ColorAnalyzeReport,
    width: usize,
) -> io::Result<()> {
    let rule = "─".repeat(width.clamp(20, 80));

    writeln!(
        out,
        "\n{} {}",
        "Contrast report for".if_supports_color(Stdout, |t| t.bold()),
        report.url
    )?;
    writeln!(out, "{rule}")?;

    for (index, element) in report.elements.iter().enumerate() {
        write_element(out, index, element)?;
    }

    writeln!(out, "{rule}")?;

    let low = report.low_contrast().count();
    let summary = format!("{} elements, {} below WCAG AA", report.len(), low);
    if low == 0 {
        writeln!(out, "  {}", summary.if_supports_color(Stdout, |t| t.green()))
    } else {
        writeln!(out, "  {}", summary.if_supports_color(Stdout, |t| t.yellow()))
    }
}

/// Print the report table to stdout, sized to the terminal.
pub fn print_report(report: &ColorAnalyzeReport) -> io::Result<()> {
    let width = Term::stdout().size().1 as usize;
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_report(&mut lock, report, width)
}
