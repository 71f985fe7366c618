use crate::error::{Result, TimeError};
use crate::pattern::DEFAULT_PATTERN;
use crate::relative::RelativeOptions;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "timeutils_config.json";

/// Defaults for the command line, stored as JSON next to the executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    #[serde(default)]
    pub relative: RelativeOptions,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Config {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            default_pattern: default_pattern(),
            relative: RelativeOptions::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ConfigManager {
    config_file_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_file_path = Self::get_config_file_path()?;
        Ok(Self { config_file_path })
    }

    pub fn with_path(config_file_path: impl Into<PathBuf>) -> Self {
        Self {
            config_file_path: config_file_path.into(),
        }
    }

    fn get_config_file_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe()?;
        let exe_dir = exe_path.parent().ok_or_else(|| {
            TimeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine executable directory",
            ))
        })?;
        Ok(exe_dir.join(CONFIG_FILE_NAME))
    }

    pub fn clear_config(&self) -> Result<()> {
        if self.config_file_path.exists() {
            fs::remove_file(&self.config_file_path)?;
        }
        Ok(())
    }

    pub fn config_exists(&self) -> bool {
        self.config_file_path.exists()
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_file_path
    }

    /// Load the config, falling back to defaults if it doesn't exist
    pub fn load_config(&self) -> Result<Config> {
        debug!("Loading config from: {}", self.config_file_path.display());

        if !self.config_file_path.exists() {
            debug!("Config file does not exist, using defaults");
            return Ok(Config::new());
        }

        let content = fs::read_to_string(&self.config_file_path)?;
        let config: Config = serde_json::from_str(&content)?;
        debug!("Successfully loaded config with version: {}", config.version);

        if config.version != env!("CARGO_PKG_VERSION") {
            warn!(
                "Config version mismatch (found: {}, expected: {}), using defaults",
                config.version,
                env!("CARGO_PKG_VERSION")
            );
            return Ok(Config::new());
        }

        Ok(config)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        debug!("Saving config to: {}", self.config_file_path.display());
        let content = serde_json::to_string_pretty(config)?;

        if let Some(parent) = self.config_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.config_file_path, content)?;
        debug!("Successfully saved config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(dir.path().join(CONFIG_FILE_NAME))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        assert!(!manager.config_exists());
        let config = manager.load_config().unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.default_pattern, "MM-DD-YY hh:mm:ss a");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        let mut config = Config::new();
        config.default_pattern = "YYYY-MM-DD".to_string();
        config.relative.add_suffix = true;
        manager.save_config(&config).unwrap();

        assert!(manager.config_exists());
        assert_eq!(manager.load_config().unwrap(), config);
    }

    #[test]
    fn test_version_mismatch_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        fs::write(
            manager.get_config_path(),
            r#"{"version": "0.0.0-old", "default_pattern": "HH:mm"}"#,
        )
        .unwrap();

        assert_eq!(manager.load_config().unwrap(), Config::new());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        let content = format!(r#"{{"version": "{}"}}"#, env!("CARGO_PKG_VERSION"));
        fs::write(manager.get_config_path(), content).unwrap();

        assert_eq!(manager.load_config().unwrap(), Config::new());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);
        fs::write(manager.get_config_path(), "{ not json").unwrap();

        assert!(matches!(
            manager.load_config(),
            Err(TimeError::Serialization(_))
        ));
    }

    #[test]
    fn test_clear_config() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);

        manager.save_config(&Config::new()).unwrap();
        manager.clear_config().unwrap();
        assert!(!manager.config_exists());

        // Clearing twice is fine
        manager.clear_config().unwrap();
    }
}
