use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;

pub use crate::domain::error::ConfigError;
use crate::domain::models::config::Config;

/// Directory holding project-local configuration
pub const CONFIG_DIR: &str = ".settle";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "SETTLE_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .settle/config.yaml (project config)
    /// 3. .settle/local.yaml (project local overrides, optional)
    /// 4. Environment variables (SETTLE_* prefix, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Load configuration rooted at `dir` instead of `.settle/`
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// A low `round_limit` is deliberately not rejected here; the convergence
    /// loop warns about it and still renders once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.convergence.store_name.trim().is_empty() {
            return Err(ConfigError::EmptyStoreName);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::DEFAULT_STORE_NAME;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.convergence.round_limit, 2);
        assert_eq!(config.convergence.store_name, DEFAULT_STORE_NAME);
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.log_dir.is_none());
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
convergence:
  round_limit: 8
  store_name: page_wait
logging:
  level: debug
  format: json
  log_dir: /var/log/settle
  rotation: hourly
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.convergence.round_limit, 8);
        assert_eq!(config.convergence.store_name, "page_wait");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(
            config.logging.log_dir.as_deref(),
            Some(Path::new("/var/log/settle"))
        );
        assert_eq!(config.logging.rotation, "hourly");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("convergence:\n  round_limit: 4\n").unwrap();
        assert_eq!(config.convergence.round_limit, 4);
        assert_eq!(config.convergence.store_name, DEFAULT_STORE_NAME);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_low_round_limit_is_valid() {
        let mut config = Config::default();
        config.convergence.round_limit = 0;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_store_name() {
        let mut config = Config::default();
        config.convergence.store_name = "  ".to_string();

        let result = ConfigLoader::validate(&config);
        assert!(matches!(result.unwrap_err(), ConfigError::EmptyStoreName));
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidRotation(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settle.yaml");
        fs::write(&path, "convergence:\n  round_limit: 6\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.convergence.round_limit, 6);
        assert_eq!(config.convergence.store_name, DEFAULT_STORE_NAME);
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settle.yaml");
        fs::write(&path, "logging:\n  format: xml\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_local_overrides_project_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "convergence:\n  round_limit: 3\n  store_name: base\n",
        )
        .unwrap();
        fs::write(dir.path().join("local.yaml"), "convergence:\n  round_limit: 9\n").unwrap();

        let config = temp_env::with_vars_unset(
            ["SETTLE_CONVERGENCE__ROUND_LIMIT", "SETTLE_CONVERGENCE__STORE_NAME"],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();

        assert_eq!(config.convergence.round_limit, 9);
        assert_eq!(config.convergence.store_name, "base");
    }

    #[test]
    fn test_env_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "convergence:\n  round_limit: 3\n",
        )
        .unwrap();

        let config = temp_env::with_vars(
            [
                ("SETTLE_CONVERGENCE__ROUND_LIMIT", Some("12")),
                ("SETTLE_LOGGING__LEVEL", Some("debug")),
            ],
            || ConfigLoader::load_from_dir(dir.path()),
        )
        .unwrap();

        assert_eq!(config.convergence.round_limit, 12);
        assert_eq!(config.logging.level, "debug");
    }
}
