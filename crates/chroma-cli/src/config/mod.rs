//! Configuration for the chroma CLI with multi-source loading.
//!
//! Merges settings from CLI flags, environment variables, and a config file.
//! Priority: CLI > Environment > File > Defaults

mod loading;
mod tests;

use chroma_browser::BrowserSettings;
use chroma_core::AnalyzerConfig;
use serde::{Deserialize, Serialize};

pub use loading::{ConfigOverrides, DEFAULT_CONFIG_FILE, ENV_PREFIX};

use crate::error::ConfigError;

/// Default bind address for `chroma serve`.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for `chroma serve`.
pub const DEFAULT_PORT: u16 = 8080;

/// chroma configuration - loaded from chroma.config.json, CHROMA_* and flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChromaConfig {
    /// Candidate selection and style capture
    pub analyzer: AnalyzerConfig,

    /// How the browser is launched or reached
    pub browser: BrowserSettings,

    /// HTTP service settings
    pub server: ServerSettings,
}

/// Settings for `chroma serve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    /// `host:port`, ready for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ChromaConfig {
    /// Validate the merged configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()?;

        if self.browser.load_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "browser.loadTimeoutMs".to_string(),
                value: "0".to_string(),
                hint: "Use a positive number of milliseconds".to_string(),
            });
        }

        if let Some(remote) = &self.browser.remote_url {
            let scheme_ok = ["ws://", "wss://", "http://", "https://"]
                .iter()
                .any(|scheme| remote.starts_with(scheme));
            if !scheme_ok {
                return Err(ConfigError::InvalidValue {
                    field: "browser.remoteUrl".to_string(),
                    value: remote.clone(),
                    hint: "Use a DevTools endpoint such as http://127.0.0.1:9222 or ws://..."
                        .to_string(),
                });
            }
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "server.host".to_string(),
                value: String::new(),
                hint: format!("Use an address such as {DEFAULT_HOST}"),
            });
        }

        Ok(())
    }
}
