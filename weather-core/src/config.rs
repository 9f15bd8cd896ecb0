use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::{error::WeatherError, units::UnitSystem};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// OpenWeather credentials and endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,

    /// Overrides the public endpoint, e.g. for a caching proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_units = "metric"
///
/// [openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Units used when a lookup doesn't ask for any.
    pub default_units: Option<UnitSystem>,

    #[serde(default)]
    pub openweather: OpenWeatherConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather.api_key = Some(api_key);
    }

    pub fn set_default_units(&mut self, units: UnitSystem) {
        self.default_units = Some(units);
    }

    pub fn units(&self) -> UnitSystem {
        self.default_units.unwrap_or_default()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.openweather.base_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Stored API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// API key from [`API_KEY_ENV`], falling back to the stored one.
    pub fn resolve_api_key(&self) -> Result<String, WeatherError> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve_api_key_with(&self, env_value: Option<String>) -> Result<String, WeatherError> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key().map(str::to_owned))
            .ok_or(WeatherError::MissingApiKey)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_unconfigured_imperial() {
        let cfg = Config::default();

        assert!(!cfg.is_configured());
        assert_eq!(cfg.units(), UnitSystem::Imperial);
        assert_eq!(cfg.base_url(), None);
    }

    #[test]
    fn env_key_takes_precedence() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let key = cfg.resolve_api_key_with(Some("ENV_KEY".into())).unwrap();
        assert_eq!(key, "ENV_KEY");
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        let key = cfg.resolve_api_key_with(Some("  ".into())).unwrap();
        assert_eq!(key, "FILE_KEY");
    }

    #[test]
    fn missing_key_everywhere_errors() {
        let mut cfg = Config::default();
        cfg.set_api_key(String::new());

        let err = cfg.resolve_api_key_with(None).unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.set_default_units(UnitSystem::Metric);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.units(), UnitSystem::Metric);
        assert_eq!(loaded.api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn parses_handwritten_toml() {
        let cfg: Config = toml::from_str(
            r#"
            default_units = "metric"

            [openweather]
            api_key = "abc"
            base_url = "http://localhost:9000"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.units(), UnitSystem::Metric);
        assert_eq!(cfg.api_key(), Some("abc"));
        assert_eq!(cfg.base_url(), Some("http://localhost:9000"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_units = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
