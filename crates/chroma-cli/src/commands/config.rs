//! `chroma config`

use std::path::Path;

use crate::cli::ConfigArgs;
use crate::config::{ChromaConfig, ConfigOverrides};
use crate::error::Result;

/// Print the merged configuration as JSON, or only validate it with `--check`.
pub async fn execute(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let config = ChromaConfig::load(&ConfigOverrides::default(), config_path)?;

    if !args.check {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    Ok(())
}
