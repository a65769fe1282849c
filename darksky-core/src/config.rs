use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    client::ForecastClient, error::DarkSkyError, model::UnitSystem, transport::TransportOptions,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// units = "si"
/// language = "en"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "TransportOptions::is_empty")]
    pub transport: TransportOptions,
}

impl Config {
    /// Returns the API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, DarkSkyError> {
        toml::from_str(contents)
            .map_err(|e| DarkSkyError::ConfigFile(format!("failed to parse TOML: {e}")))
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self, DarkSkyError> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, DarkSkyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            DarkSkyError::ConfigFile(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&contents).map_err(|e| {
            DarkSkyError::ConfigFile(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf, DarkSkyError> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), DarkSkyError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DarkSkyError::ConfigFile(format!(
                    "failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let toml = toml::to_string_pretty(self).map_err(|e| {
            DarkSkyError::ConfigFile(format!("failed to serialize configuration: {e}"))
        })?;

        fs::write(path, toml).map_err(|e| {
            DarkSkyError::ConfigFile(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, DarkSkyError> {
        let dirs = ProjectDirs::from("dev", "darksky", "darksky").ok_or_else(|| {
            DarkSkyError::ConfigFile("could not determine platform config directory".into())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

impl ForecastClient {
    /// Build a client from a loaded [`Config`], defaulting to SI units and
    /// English when those are not configured.
    pub fn from_config(config: &Config) -> Result<Self, DarkSkyError> {
        let api_key = config.api_key().ok_or_else(|| {
            DarkSkyError::MissingCredential(
                "no API key configured.\n\
                 Hint: run `darksky configure` and enter your API key."
                    .into(),
            )
        })?;

        ForecastClient::with_settings(
            api_key,
            config.units.unwrap_or(UnitSystem::Si),
            config.language.as_deref().unwrap_or("en"),
            config.transport.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn from_config_errors_when_api_key_missing() {
        let err = ForecastClient::from_config(&Config::default()).unwrap_err();

        assert!(matches!(err, DarkSkyError::MissingCredential(_)));
        assert!(err.to_string().contains("Hint: run `darksky configure`"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = Config { api_key: Some("   ".into()), ..Default::default() };

        assert_eq!(cfg.api_key(), None);
        assert!(matches!(
            ForecastClient::from_config(&cfg),
            Err(DarkSkyError::MissingCredential(_))
        ));
    }

    #[test]
    fn from_config_applies_defaults() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let client = ForecastClient::from_config(&cfg).expect("client must build");
        assert_eq!(client.default_units(), UnitSystem::Si);
        assert_eq!(client.default_language(), "en");
    }

    #[test]
    fn from_config_rejects_unsupported_language() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            language: Some("xx".into()),
            ..Default::default()
        };

        let err = ForecastClient::from_config(&cfg).unwrap_err();
        assert!(matches!(err, DarkSkyError::InvalidConfiguration(_)));
    }

    #[test]
    fn parses_full_toml() {
        let cfg = Config::from_toml_str(
            r#"
            api_key = "KEY"
            units = "uk2"
            language = "NL"

            [transport]
            base_url = "http://localhost:8080"
            timeout_secs = 2.5

            [transport.headers]
            X-Trace = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api_key(), Some("KEY"));
        assert_eq!(cfg.units, Some(UnitSystem::Uk));
        assert_eq!(cfg.transport.base_url.as_deref(), Some("http://localhost:8080"));

        let client = ForecastClient::from_config(&cfg).unwrap();
        assert_eq!(client.default_language(), "nl");

        let resolved = client.transport_options().resolve().unwrap();
        assert_eq!(resolved.timeout, Duration::from_millis(2500));
        assert_eq!(resolved.headers["x-trace"], "abc");
    }

    #[test]
    fn bad_toml_is_a_config_file_error() {
        let err = Config::from_toml_str("units = ").unwrap_err();
        assert!(matches!(err, DarkSkyError::ConfigFile(_)));
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            units: Some(UnitSystem::Auto),
            language: Some("de".into()),
            transport: TransportOptions::default().with_timeout(Duration::from_secs(3)),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }
}
