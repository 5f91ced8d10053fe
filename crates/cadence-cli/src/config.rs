//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this configuration is persisted to
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Connection profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// API base URL
    pub server_url: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home_dir()?.join("config.toml"))
    }

    /// Directory holding the config and REPL history.
    pub fn home_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".cadence"))
    }

    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if the file is missing.
    ///
    /// Either way, later saves go back to `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        match &self.path {
            Some(path) => self.save_to(path),
            None => self.save_to(&Self::path()?),
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Server URL to talk to: the override if given, else the active profile's.
    pub fn server_url(&self, server_override: Option<&str>) -> Result<String> {
        match server_override {
            Some(url) => Ok(url.to_string()),
            None => Ok(self.get_active_profile()?.server_url.clone()),
        }
    }

    /// Request timeout from settings.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                server_url: cadence_sdk::DEFAULT_BASE_URL.to_string(),
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            timeout_secs: cadence_sdk::DEFAULT_TIMEOUT_SECS,
            history_size: 1000,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout_secs() -> u64 {
    cadence_sdk::DEFAULT_TIMEOUT_SECS
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(
            config.get_active_profile().unwrap().server_url,
            "http://localhost:8000"
        );
        assert!(config.settings.color);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            server_url: "http://staging.example.com".to_string(),
        };

        config.set_profile("staging".to_string(), profile);
        assert!(config.profiles.contains_key("staging"));

        config.switch_profile("staging".to_string()).unwrap();
        assert_eq!(config.active_profile, "staging");
        assert_eq!(config.server_url(None).unwrap(), "http://staging.example.com");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_server_override_wins() {
        let config = Config::default();
        assert_eq!(
            config.server_url(Some("http://other:9000")).unwrap(),
            "http://other:9000"
        );
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set_profile(
            "prod".to_string(),
            Profile {
                server_url: "https://cadence.example.com".to_string(),
            },
        );
        config.switch_profile("prod".to_string()).unwrap();
        config.settings.timeout_secs = 5;
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.active_profile, "prod");
        assert_eq!(reloaded.settings.timeout_secs, 5);
        assert_eq!(
            reloaded.profiles["prod"].server_url,
            "https://cadence.example.com"
        );
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_profile = \"default\"\n\n[settings]\ncolor = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.settings.history_size, 1000);
        assert!(config.profiles.is_empty());
    }
}
