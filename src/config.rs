//! Layered configuration for AccessTC
//!
//! Settings are resolved in order: built-in defaults, then a TOML file, then
//! `ACCESSTC_*` environment variables. CLI flags are applied last by the
//! command layer (see `cli::commands::shared::apply_cli_overrides`).

use crate::app::models::VariantSelection;
use crate::constants::{self, env};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub geocoder: GeocoderConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Grid source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub path: PathBuf,
    pub delimiter: char,
    pub variant: VariantSelection,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(constants::DEFAULT_GRID_FILE),
            delimiter: constants::DEFAULT_DELIMITER,
            variant: VariantSelection::Auto,
        }
    }
}

/// Nominatim client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub country_codes: String,
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: constants::NOMINATIM_URL.to_string(),
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
            country_codes: constants::DEFAULT_COUNTRY_CODES.to_string(),
            timeout_secs: constants::DEFAULT_GEOCODER_TIMEOUT_SECS,
        }
    }
}

impl GeocoderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: constants::DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config file location under the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine the user configuration directory")
        })?;
        Ok(base
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Parse a TOML configuration file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file '{}'", path.display()),
                e,
            )
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Build configuration from defaults, optional file and process environment
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Reading config file: {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(env::GRID_PATH) {
            debug!("{} overrides grid path", env::GRID_PATH);
            self.grid.path = PathBuf::from(path);
        }
        if let Some(delimiter) = lookup(env::GRID_DELIMITER) {
            self.grid.delimiter = parse_delimiter(&delimiter)?;
        }
        if let Some(variant) = lookup(env::GRID_VARIANT) {
            self.grid.variant = variant.parse()?;
        }
        if let Some(url) = lookup(env::GEOCODER_URL) {
            self.geocoder.base_url = url;
        }
        if let Some(user_agent) = lookup(env::USER_AGENT) {
            self.geocoder.user_agent = user_agent;
        }
        if let Some(bind) = lookup(env::BIND) {
            self.server.bind = bind;
        }
        Ok(())
    }

    /// Check cross-field constraints after all layers are applied
    pub fn validate(&self) -> Result<()> {
        if !self.grid.delimiter.is_ascii() {
            return Err(Error::configuration(format!(
                "Delimiter '{}' must be a single ASCII character",
                self.grid.delimiter
            )));
        }
        if self.geocoder.timeout_secs == 0 {
            return Err(Error::configuration(
                "Geocoder timeout must be greater than zero",
            ));
        }
        if self.geocoder.base_url.trim().is_empty() {
            return Err(Error::configuration("Geocoder URL must not be empty"));
        }
        if self.geocoder.user_agent.trim().is_empty() {
            return Err(Error::configuration(
                "Geocoder User-Agent must not be empty",
            ));
        }
        if self.server.bind.trim().is_empty() {
            return Err(Error::configuration("Bind address must not be empty"));
        }
        Ok(())
    }

    /// Delimiter as the byte expected by the CSV reader
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.grid.delimiter).map_err(|_| {
            Error::configuration(format!(
                "Delimiter '{}' must be a single ASCII character",
                self.grid.delimiter
            ))
        })
    }
}

/// Parse a delimiter given as text; exactly one character is accepted
pub fn parse_delimiter(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(Error::configuration(format!(
            "Delimiter '{}' must be a single ASCII character",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.grid.path, PathBuf::from("grid_scores.csv"));
        assert_eq!(config.grid.delimiter, ';');
        assert_eq!(config.grid.variant, VariantSelection::Auto);
        assert_eq!(config.geocoder.user_agent, "AccessTC-app/1.0");
        assert_eq!(config.geocoder.country_codes, "be");
        assert_eq!(config.geocoder.timeout(), Duration::from_secs(10));
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [grid]
            path = "/data/grid.csv"
            variant = "extended"

            [server]
            bind = "0.0.0.0:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.path, PathBuf::from("/data/grid.csv"));
        assert_eq!(config.grid.variant, VariantSelection::Extended);
        assert_eq!(config.grid.delimiter, ';');
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.geocoder, GeocoderConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = Config::from_toml_str("[grid\npath = 1").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_load_layered_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[geocoder]\ntimeout_secs = 3").unwrap();

        let config = Config::load_layered(Some(file.path())).unwrap();
        assert_eq!(config.geocoder.timeout_secs, 3);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(Path::new("/nonexistent/accesstc.toml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ACCESSTC_GRID_PATH", "/srv/grid.csv"),
            ("ACCESSTC_GRID_DELIMITER", ","),
            ("ACCESSTC_GRID_VARIANT", "simple"),
            ("ACCESSTC_GEOCODER_URL", "http://localhost:7070/search"),
            ("ACCESSTC_USER_AGENT", "test-agent"),
            ("ACCESSTC_BIND", "0.0.0.0:80"),
        ]);

        let mut config = Config::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.grid.path, PathBuf::from("/srv/grid.csv"));
        assert_eq!(config.grid.delimiter, ',');
        assert_eq!(config.grid.variant, VariantSelection::Simple);
        assert_eq!(config.geocoder.base_url, "http://localhost:7070/search");
        assert_eq!(config.geocoder.user_agent, "test-agent");
        assert_eq!(config.server.bind, "0.0.0.0:80");
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = Config::default();
        assert!(
            config
                .apply_env(|key| (key == "ACCESSTC_GRID_DELIMITER").then(|| ";;".to_string()))
                .is_err()
        );
        assert!(
            config
                .apply_env(|key| (key == "ACCESSTC_GRID_VARIANT").then(|| "huge".to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.geocoder.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.geocoder.user_agent = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.delimiter = 'é';
        assert!(config.validate().is_err());
        assert!(config.delimiter_byte().is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), ';');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";,").is_err());
    }
}
