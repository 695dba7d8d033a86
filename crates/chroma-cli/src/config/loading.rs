use crate::config::ChromaConfig;
use crate::error::ConfigError;
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde_json::{Map, Value};
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "chroma.config.json";

/// Prefix of environment overrides, e.g. `CHROMA_ANALYZER__MAX_CHILDREN=10`.
pub const ENV_PREFIX: &str = "CHROMA_";

/// Values given on the command line. `None` leaves lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub max_children: Option<usize>,
    pub remote_url: Option<String>,
    pub headed: bool,
    pub no_sandbox: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ConfigOverrides {
    /// The overrides as a partial config document.
    fn to_value(&self) -> Value {
        let mut analyzer = Map::new();
        let mut browser = Map::new();
        let mut server = Map::new();

        if let Some(max_children) = self.max_children {
            analyzer.insert("maxChildren".into(), max_children.into());
        }
        if let Some(remote_url) = &self.remote_url {
            browser.insert("remoteUrl".into(), remote_url.clone().into());
        }
        if self.headed {
            browser.insert("headless".into(), false.into());
        }
        if self.no_sandbox {
            browser.insert("noSandbox".into(), true.into());
        }
        if let Some(host) = &self.host {
            server.insert("host".into(), host.clone().into());
        }
        if let Some(port) = self.port {
            server.insert("port".into(), port.into());
        }

        let mut root = Map::new();
        for (key, section) in [("analyzer", analyzer), ("browser", browser), ("server", server)] {
            if !section.is_empty() {
                root.insert(key.into(), Value::Object(section));
            }
        }
        Value::Object(root)
    }
}

impl ChromaConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(
        overrides: &ConfigOverrides,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        // An explicit --config must exist; the default file is optional
        let config_file = match config_path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        // CHROMA_BROWSER__REMOTE_URL -> browser.remoteUrl
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .lowercase(false)
                .map(|key| env_key_path(key.as_str()).into()),
        );

        figment = figment.merge(Serialized::defaults(overrides.to_value()));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Extract(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Maps an environment key (prefix stripped) to a camelCase key path.
///
/// `__` separates nesting levels, single `_` separates words:
/// `ANALYZER__MAX_CHILDREN` -> `analyzer.maxChildren`.
pub(crate) fn env_key_path(key: &str) -> String {
    key.split("__")
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            for (i, word) in segment.split('_').filter(|w| !w.is_empty()).enumerate() {
                let word = word.to_ascii_lowercase();
                if i == 0 {
                    out.push_str(&word);
                } else {
                    let mut chars = word.chars();
                    if let Some(first) = chars.next() {
                        out.push(first.to_ascii_uppercase());
                        out.push_str(chars.as_str());
                    }
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}
