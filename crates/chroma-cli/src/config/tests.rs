#[cfg(test)]
mod tests {
    use crate::config::loading::env_key_path;
    use crate::config::*;
    use crate::error::ConfigError;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("chroma.config.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_env_key_path() {
        assert_eq!(env_key_path("ANALYZER__MAX_CHILDREN"), "analyzer.maxChildren");
        assert_eq!(env_key_path("BROWSER__REMOTE_URL"), "browser.remoteUrl");
        assert_eq!(env_key_path("BROWSER__LOAD_TIMEOUT_MS"), "browser.loadTimeoutMs");
        assert_eq!(env_key_path("SERVER__PORT"), "server.port");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = serde_json::to_value(ChromaConfig::default()).unwrap();
        assert_eq!(json["analyzer"]["maxChildren"], 5);
        assert_eq!(json["server"]["port"], DEFAULT_PORT);
        assert!(json["browser"].get("loadTimeoutMs").is_some());
        assert!(json["analyzer"].get("max_children").is_none());
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        let config = ChromaConfig::load(&ConfigOverrides::default(), None).unwrap();
        assert_eq!(config, ChromaConfig::default());
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "analyzer": { "maxChildren": 10 },
                "browser": { "remoteUrl": "http://127.0.0.1:9222" },
                "server": { "port": 9000 }
            }"#,
        );

        let config = ChromaConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap();

        assert_eq!(config.analyzer.max_children, 10);
        assert_eq!(
            config.analyzer.content_tags,
            chroma_core::AnalyzerConfig::default().content_tags
        );
        assert_eq!(config.browser.remote_url.as_deref(), Some("http://127.0.0.1:9222"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, DEFAULT_HOST);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "analyzer": { "maxChildren": 10 } }"#);
        let overrides = ConfigOverrides {
            max_children: Some(3),
            headed: true,
            no_sandbox: true,
            port: Some(7000),
            ..ConfigOverrides::default()
        };

        let config = ChromaConfig::load(&overrides, Some(&path)).unwrap();

        assert_eq!(config.analyzer.max_children, 3);
        assert!(!config.browser.headless);
        assert!(config.browser.no_sandbox);
        assert_eq!(config.server.port, 7000);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_but_not_cli() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "analyzer": { "maxChildren": 10 } }"#);

        unsafe {
            std::env::set_var("CHROMA_ANALYZER__MAX_CHILDREN", "7");
            std::env::set_var("CHROMA_SERVER__HOST", "0.0.0.0");
        }
        let from_env = ChromaConfig::load(&ConfigOverrides::default(), Some(&path));
        let from_cli = ChromaConfig::load(
            &ConfigOverrides {
                max_children: Some(2),
                ..ConfigOverrides::default()
            },
            Some(&path),
        );
        unsafe {
            std::env::remove_var("CHROMA_ANALYZER__MAX_CHILDREN");
            std::env::remove_var("CHROMA_SERVER__HOST");
        }

        let from_env = from_env.unwrap();
        assert_eq!(from_env.analyzer.max_children, 7);
        assert_eq!(from_env.server.host, "0.0.0.0");
        assert_eq!(from_cli.unwrap().analyzer.max_children, 2);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = ChromaConfig::load(&ConfigOverrides::default(), Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == missing));
    }

    #[test]
    #[serial]
    fn test_invalid_json_types_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "analyzer": { "maxChildren": "many" } }"#);
        let err = ChromaConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Extract(_)));
    }

    #[test]
    #[serial]
    fn test_validation_runs_after_merge() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "analyzer": { "styleProperties": ["color"] } }"#);
        let err = ChromaConfig::load(&ConfigOverrides::default(), Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Analyzer(chroma_core::ConfigError::BackgroundNotCaptured(_))
        ));
    }

    #[test]
    fn test_validate_remote_url_scheme() {
        let mut config = ChromaConfig::default();
        config.browser.remote_url = Some("127.0.0.1:9222".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "browser.remoteUrl"
        ));

        config.browser.remote_url = Some("ws://127.0.0.1:9222/devtools/browser/x".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(ServerSettings::default().bind_address(), "127.0.0.1:8080");
    }
}
