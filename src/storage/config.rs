//! Profile file management
//!
//! Named profiles stored in `~/.config/payrail/config.toml`.
//! URL priority: PAYRAIL_URL environment variable > profile.

use super::Result;
use crate::core::config::{Config, Credentials, HttpConfig};
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

pub const URL_ENV: &str = "PAYRAIL_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub base_url: Option<String>,
    pub tenant_id: Option<String>,
    pub timeout_secs: Option<f64>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Profile {
    /// Base URL with the environment override applied.
    pub fn resolved_url(&self) -> Option<String> {
        std::env::var(URL_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.base_url.clone())
    }

    /// Build a runtime config. Validation happens when the config is adopted.
    pub fn to_config(&self, base_url: String, credentials: Credentials) -> Config {
        let mut config = Config::new(base_url);
        config.tenant_id = self.tenant_id.clone();
        config.credentials = credentials;
        config.http = HttpConfig {
            timeout_secs: self.timeout_secs,
            headers: self.headers.clone(),
        };
        config
    }

    /// Set a user-facing field from its string form.
    pub fn set_field(&mut self, field: &str, value: &str) -> std::result::Result<(), String> {
        match field {
            "url" => self.base_url = Some(value.to_string()),
            "tenant" => self.tenant_id = Some(value.to_string()),
            "timeout" => {
                let secs = value
                    .parse::<f64>()
                    .map_err(|_| format!("timeout must be a number of seconds, got '{}'", value))?;
                self.timeout_secs = Some(secs);
            }
            _ => {
                return Err(format!(
                    "Unknown field: {}. Use 'url', 'tenant' or 'timeout'",
                    field
                ));
            }
        }
        Ok(())
    }
}

impl Settings {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to parse config file: {}", e),
        })
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("payrail").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles.entry(name.to_string()).or_default()
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.default_profile, None);
        assert_eq!(settings.profiles.len(), 0);
    }

    #[test]
    fn test_profile_management() {
        let mut settings = Settings::default();
        let profile = Profile {
            base_url: Some("https://sandbox.payrail.example".to_string()),
            tenant_id: Some("acme".to_string()),
            timeout_secs: Some(10.0),
            headers: BTreeMap::new(),
        };
        settings.set_profile("sandbox".to_string(), profile.clone());

        assert_eq!(settings.get_profile("sandbox"), Some(&profile));
        assert!(settings.get_profile("nonexistent").is_none());
    }

    #[test]
    fn test_settings_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.default_profile = Some("prod".to_string());
        let profile = settings.profile_mut("prod");
        profile.base_url = Some("https://api.payrail.example".to_string());
        profile
            .headers
            .insert("x-api-version".to_string(), "2024-01".to_string());

        settings
            .save(Some(config_path.clone()))
            .expect("Failed to save config");
        let loaded = Settings::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded.default_profile.as_deref(), Some("prod"));
        assert_eq!(loaded.get_profile("prod"), settings.get_profile("prod"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let settings = Settings::load(Some(temp_dir.path().join("missing.toml")))
            .expect("Failed to load default config");
        assert!(settings.profiles.is_empty());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "profiles = [[[").unwrap();

        let err = Settings::load(Some(config_path)).unwrap_err();
        assert!(matches!(err, StorageError::ConfigParseError { .. }));
    }

    #[test]
    fn test_set_field() {
        let mut profile = Profile::default();
        assert!(profile.set_field("url", "https://api.payrail.example").is_ok());
        assert!(profile.set_field("tenant", "acme").is_ok());
        assert!(profile.set_field("timeout", "12.5").is_ok());
        assert_eq!(profile.timeout_secs, Some(12.5));

        assert!(profile.set_field("timeout", "soon").is_err());
        let err = profile.set_field("base_url", "x").unwrap_err();
        assert!(err.contains("Unknown field: base_url"));
    }

    #[test]
    fn test_to_config_copies_profile_fields() {
        let mut profile = Profile::default();
        profile.tenant_id = Some("acme".to_string());
        profile.timeout_secs = Some(5.0);

        let config = profile.to_config(
            "https://api.payrail.example".to_string(),
            Credentials::default(),
        );
        assert_eq!(config.tenant_id.as_deref(), Some("acme"));
        assert_eq!(config.http.timeout_secs, Some(5.0));
        assert!(config.validate().is_ok());
    }
}
