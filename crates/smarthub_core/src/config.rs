//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database location, logging and weather API settings.
//! - Provide platform defaults when variables are unset.

use std::env;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SMARTHUB_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SMARTHUB_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SMARTHUB_LOG_DIR";
pub const ENV_WEATHER_API_KEY: &str = "OPENWEATHERMAP_API_KEY";
pub const ENV_WEATHER_BASE_URL: &str = "SMARTHUB_WEATHER_BASE_URL";
pub const ENV_GEO_BASE_URL: &str = "SMARTHUB_GEO_BASE_URL";

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_UNITS: &str = "metric";

const APP_DIR_NAME: &str = "smart-tools-hub";
const DB_FILE_NAME: &str = "hub.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub geo_url: String,
    pub units: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geo_url: DEFAULT_GEO_URL.to_string(),
            units: DEFAULT_UNITS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory; must be absolute.
    pub log_dir: PathBuf,
    pub weather: WeatherConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: crate::logging::default_log_level().to_string(),
            log_dir: default_log_dir(),
            weather: WeatherConfig::default(),
        }
    }
}

impl HubConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            db_path: get(ENV_DB_PATH).map_or(defaults.db_path, PathBuf::from),
            log_level: get(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: get(ENV_LOG_DIR).map_or(defaults.log_dir, PathBuf::from),
            weather: WeatherConfig {
                api_key: get(ENV_WEATHER_API_KEY),
                base_url: get(ENV_WEATHER_BASE_URL).unwrap_or(defaults.weather.base_url),
                geo_url: get(ENV_GEO_BASE_URL).unwrap_or(defaults.weather.geo_url),
                units: defaults.weather.units,
            },
        }
    }
}

/// Database file under the platform data directory, falling back to the
/// working directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DB_FILE_NAME)
}

/// `logs/` under the platform data directory, or under the temp directory
/// when the platform has none. Always absolute.
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR_NAME)
        .join(LOG_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        default_log_dir, HubConfig, DEFAULT_WEATHER_BASE_URL, ENV_DB_PATH, ENV_LOG_DIR,
        ENV_WEATHER_API_KEY,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn lookup_overrides_defaults_and_ignores_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/tmp/hub-test.sqlite3"),
            (ENV_WEATHER_API_KEY, "   "),
        ]);
        let config = HubConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/tmp/hub-test.sqlite3"));
        assert_eq!(config.weather.api_key, None);
        assert_eq!(config.weather.base_url, DEFAULT_WEATHER_BASE_URL);
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn log_dir_defaults_to_absolute_data_dir_and_can_be_overridden() {
        let config = HubConfig::default();
        assert!(config.log_dir.is_absolute());
        assert!(config.log_dir.ends_with("smart-tools-hub/logs"));

        let custom = HubConfig::from_lookup(|key| {
            (key == ENV_LOG_DIR).then(|| "/var/log/smarthub".to_string())
        });
        assert_eq!(custom.log_dir, PathBuf::from("/var/log/smarthub"));
    }

    #[test]
    fn default_db_path_ends_with_file_name() {
        let config = HubConfig::default();
        assert!(config.db_path.ends_with("smart-tools-hub/hub.sqlite3"));
    }
}
