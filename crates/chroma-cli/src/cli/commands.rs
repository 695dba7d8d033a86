use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::OutputFormat;
use crate::cli::validation::parse_url;

/// Available chroma subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze the colour contrast of one page
    ///
    /// Launches (or attaches to) Chrome, loads the page, and reports every
    /// distinct content style with its contrast ratios.
    Analyze(AnalyzeArgs),

    /// Run the HTTP analysis service
    ///
    /// Exposes `POST /validate/color` taking `{"url": "..."}` and returning
    /// the report as JSON. Each request gets its own browser session.
    Serve(ServeArgs),

    /// Print the effective configuration
    ///
    /// Shows the result of merging defaults, the config file, CHROMA_*
    /// environment variables, and flags.
    Config(ConfigArgs),
}

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Page to analyze
    ///
    /// A bare host such as `example.com` is loaded over https.
    #[arg(value_name = "URL", value_parser = parse_url)]
    pub url: String,

    /// Output format
    ///
    /// - table: human-readable summary with WCAG levels
    /// - json: the full report
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Also write the JSON report to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Skip elements with more direct children than this
    #[arg(long, value_name = "N")]
    pub max_children: Option<usize>,

    /// Attach to a running browser instead of launching one
    ///
    /// Accepts a DevTools endpoint such as `http://127.0.0.1:9222`.
    #[arg(long, value_name = "URL")]
    pub remote_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Run Chrome without its sandbox
    ///
    /// Needed in containers without user namespaces. Only use it when the
    /// container is the isolation boundary. Same as `browser.noSandbox`.
    #[arg(long)]
    pub no_sandbox: bool,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Attach to a running browser instead of launching one per request
    #[arg(long, value_name = "URL")]
    pub remote_url: Option<String>,

    /// Run Chrome without its sandbox
    ///
    /// Needed in containers without user namespaces. Only use it when the
    /// container is the isolation boundary. Same as `browser.noSandbox`.
    #[arg(long)]
    pub no_sandbox: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Validate only; print nothing on success
    #[arg(long)]
    pub check: bool,
}
