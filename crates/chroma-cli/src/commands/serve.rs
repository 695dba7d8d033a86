//! `chroma serve`

use std::path::Path;
use std::sync::Arc;

use chroma_core::{ChromeSessionProvider, ConcurrentLuminanceCache, ContrastAnalyzer};

use crate::cli::ServeArgs;
use crate::config::{ChromaConfig, ConfigOverrides};
use crate::error::{ConfigError, Result};
use crate::server::{self, AppState};

/// Execute the serve command. Runs until Ctrl-C.
pub async fn execute(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let overrides = ConfigOverrides {
        remote_url: args.remote_url,
        host: args.host,
        port: args.port,
        no_sandbox: args.no_sandbox,
        ..ConfigOverrides::default()
    };
    let config = ChromaConfig::load(&overrides, config_path)?;

    if config.browser.no_sandbox && config.browser.remote_url.is_none() {
        tracing::warn!("Chrome sandbox disabled; pages from clients run unconfined");
    }

    // One cache for the life of the process, shared by every request
    let analyzer = ContrastAnalyzer::new(config.analyzer, ConcurrentLuminanceCache::shared())
        .map_err(ConfigError::from)?;
    let provider = Arc::new(ChromeSessionProvider::new(config.browser));

    server::serve(AppState::new(analyzer, provider), &config.server.bind_address()).await
}
