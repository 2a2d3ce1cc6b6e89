//! Configuration schema types
//!
//! This module defines the configuration structure that maps to the TOML
//! file. Every section validates itself; `ZaakimportConfig::validate` ties
//! them together.

use crate::config::SecretString;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Main zaakimport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZaakimportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Target catalog API
    pub catalog: CatalogConfig,

    /// Selectielijst reference API
    #[serde(default)]
    pub selectielijst: SelectielijstConfig,

    /// Import run settings
    pub import: ImportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ZaakimportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.selectielijst.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Target catalog API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Root of the ZTC API, e.g. `https://catalogi.example.nl/api/v1`
    pub api_root: String,

    /// Absolute URL of the catalog all imported resources land in
    pub catalog_url: String,

    /// Bearer token for the API; kept out of logs and zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_root)
            .map_err(|e| format!("catalog.api_root is not a valid URL: {e}"))?;
        url::Url::parse(&self.catalog_url)
            .map_err(|e| format!("catalog.catalog_url is not a valid URL: {e}"))?;
        if self.timeout_seconds == 0 {
            return Err("catalog.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Selectielijst reference API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectielijstConfig {
    /// Root of the Selectielijst API
    #[serde(default = "default_selectielijst_root")]
    pub api_root: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Taxonomy cache time-to-live in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: u64,
}

impl Default for SelectielijstConfig {
    fn default() -> Self {
        Self {
            api_root: default_selectielijst_root(),
            timeout_seconds: default_timeout_seconds(),
            cache_ttl_hours: default_cache_ttl_hours(),
        }
    }
}

impl SelectielijstConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_root)
            .map_err(|e| format!("selectielijst.api_root is not a valid URL: {e}"))?;
        if self.cache_ttl_hours == 0 {
            return Err("selectielijst.cache_ttl_hours must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Import run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Selectielijst year the process types are resolved against
    pub year: u16,

    /// Close existing published resources when importing a new version
    #[serde(default)]
    pub close_published: bool,

    /// Validity start for created resources; today when omitted
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1000..=9999).contains(&self.year) {
            return Err(format!(
                "import.year must be a four-digit year, got {}",
                self.year
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file next to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory the rolling log file lands in
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation cadence: daily or hourly
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be daily or hourly",
                self.local_rotation
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_selectielijst_root() -> String {
    "https://selectielijst.openzaak.nl/api/v1".to_string()
}

fn default_cache_ttl_hours() -> u64 {
    24
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ZaakimportConfig {
        ZaakimportConfig {
            application: ApplicationConfig::default(),
            catalog: CatalogConfig {
                api_root: "https://catalogi.example.nl/api/v1".to_string(),
                catalog_url: "https://catalogi.example.nl/api/v1/catalogussen/1".to_string(),
                api_token: None,
                timeout_seconds: 30,
            },
            selectielijst: SelectielijstConfig::default(),
            import: ImportConfig {
                year: 2020,
                close_published: false,
                start_date: None,
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level_fails() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_api_root_fails() {
        let mut config = valid_config();
        config.catalog.api_root = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_year_must_be_four_digits() {
        let mut config = valid_config();
        config.import.year = 999;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_from_minimal_toml() {
        let config: ZaakimportConfig = toml::from_str(
            r#"
            [catalog]
            api_root = "https://catalogi.example.nl/api/v1"
            catalog_url = "https://catalogi.example.nl/api/v1/catalogussen/1"

            [import]
            year = 2020
            "#,
        )
        .unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(
            config.selectielijst.api_root,
            "https://selectielijst.openzaak.nl/api/v1"
        );
        assert_eq!(config.selectielijst.cache_ttl_hours, 24);
        assert!(!config.import.close_published);
        assert!(config.import.start_date.is_none());
        assert!(config.validate().is_ok());
    }
}
