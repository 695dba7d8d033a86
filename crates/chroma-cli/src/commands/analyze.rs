//! `chroma analyze <URL>`

use std::path::Path;
use std::time::Instant;

use chroma_core::{ChromeSessionProvider, ConcurrentLuminanceCache, ContrastAnalyzer};

use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::{ChromaConfig, ConfigOverrides};
use crate::error::{ConfigError, Result};
use crate::ui;

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let overrides = ConfigOverrides {
        max_children: args.max_children,
        remote_url: args.remote_url.clone(),
        headed: args.headed,
        no_sandbox: args.no_sandbox,
        ..ConfigOverrides::default()
    };
    let config = ChromaConfig::load(&overrides, config_path)?;

    let analyzer = ContrastAnalyzer::new(config.analyzer, ConcurrentLuminanceCache::shared())
        .map_err(ConfigError::from)?;
    let provider = ChromeSessionProvider::new(config.browser);

    let spinner = if quiet || args.format == OutputFormat::Json {
        ui::Spinner::hidden()
    } else {
        ui::Spinner::new(&format!("Analyzing {}...", args.url))
    };

    let started = Instant::now();
    let report = match analyzer.analyze_url(&provider, &args.url).await {
        Ok(report) => report,
        Err(err) => {
            spinner.fail(&format!("Could not analyze {}", args.url));
            return Err(err.into());
        }
    };
    spinner.finish(&format!(
        "Analyzed {} elements in {}",
        report.len(),
        ui::format_duration(started.elapsed())
    ));

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(path, json).await?;
        if !quiet {
            ui::success(&format!("Report written to {}", path.display()));
        }
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => {
            ui::print_report(&report)?;
            let low = report.low_contrast().count();
            if low > 0 && !quiet {
                ui::warning(&format!("{low} elements are below WCAG AA"));
            }
        }
    }

    Ok(())
}
