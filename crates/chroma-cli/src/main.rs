//! chroma - WCAG colour-contrast analysis for live web pages.
//!
//! Parses arguments, sets up logging and colors, and dispatches the command.

use chroma_cli::{cli, commands, error, logger, ui};
use clap::Parser;
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let config_path = args.config.as_deref();
    let result = match args.command {
        cli::Command::Analyze(analyze_args) => {
            commands::analyze_execute(analyze_args, config_path, args.quiet).await
        }
        cli::Command::Serve(serve_args) => commands::serve_execute(serve_args, config_path).await,
        cli::Command::Config(config_args) => {
            commands::config_execute(config_args, config_path).await
        }
    };

    result.map_err(error::cli_error_to_miette)
}
