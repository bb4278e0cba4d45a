//! Configuration management for flightlog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashMap;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::Coordinates;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "flightlog";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "flights.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTLOG_`, nested keys
///    separated by `__`, e.g. `FLIGHTLOG_STORAGE__DATABASE_PATH`)
/// 2. TOML config file at `~/.config/flightlog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Geocoder configuration.
    pub geocoder: GeocoderConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/flightlog/flights.db`
    pub database_path: Option<PathBuf>,
}

/// Geocoder-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    /// Extra cities to register, on top of the built-in table.
    /// Entries with the same name override built-ins.
    pub cities: HashMap<String, Coordinates>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `FLIGHTLOG_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Nested keys use `__` as the environment separator so field names
    /// containing underscores stay addressable, e.g.
    /// `FLIGHTLOG_STORAGE__DATABASE_PATH` maps to `storage.database_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("FLIGHTLOG_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured city has out-of-range coordinates.
    pub fn validate(&self) -> Result<()> {
        for (name, coords) in &self.geocoder.cities {
            if name.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "geocoder city names must not be empty".to_string(),
                });
            }
            if coords.validate().is_err() {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "invalid coordinates for city {name}: ({}, {})",
                        coords.lat, coords.lon
                    ),
                });
            }
        }
        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.geocoder.cities.is_empty());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_city_coordinates() {
        let mut config = Config::default();
        config.geocoder.cities.insert(
            "Nowhere".to_string(),
            Coordinates {
                lat: 200.0,
                lon: 0.0,
            },
        );

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Nowhere"));
    }

    #[test]
    fn test_validate_empty_city_name() {
        let mut config = Config::default();
        config.geocoder.cities.insert(
            "   ".to_string(),
            Coordinates {
                lat: 10.0,
                lon: 10.0,
            },
        );

        let result = config.validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_database_path_default() {
        let config = Config::default();
        let path = config.database_path();

        assert!(path.to_string_lossy().contains("flights.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flightlog"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("flightlog"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults).
        // Jailed so concurrent env-mutating tests can't leak in.
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("config should load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_env_override_database_path() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FLIGHTLOG_STORAGE__DATABASE_PATH", "/tmp/override.db");

            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .expect("config should load");
            assert_eq!(
                config.storage.database_path,
                Some(PathBuf::from("/tmp/override.db"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [storage]
                database_path = "/from/toml.db"
                "#,
            )?;
            jail.set_env("FLIGHTLOG_STORAGE__DATABASE_PATH", "/from/env.db");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .expect("config should load");
            assert_eq!(
                config.storage.database_path,
                Some(PathBuf::from("/from/env.db"))
            );
            Ok(())
        });
    }

    #[test]
    fn test_geocoder_config_deserialize() {
        let json = r#"{"cities": {"Springfield": {"lat": 39.8, "lon": -89.65}}}"#;
        let geocoder: GeocoderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(geocoder.cities.len(), 1);
        assert!((geocoder.cities["Springfield"].lat - 39.8).abs() < 1e-9);
    }

    #[test]
    fn test_storage_config_serialize() {
        let storage = StorageConfig::default();
        let json = serde_json::to_string(&storage).unwrap();
        assert!(json.contains("database_path"));
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
