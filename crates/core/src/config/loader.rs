//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::env;
use std::path::Path;
use tourism_geo::DistanceFormula;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults, then apply
    /// environment overrides and validate.
    ///
    /// Environment overrides:
    /// - `PLACES_DATA_PATH`: place documents file
    /// - `PLACES_LOG_LEVEL`: log filter directive
    /// - `PLACES_QUERY_TIMEOUT_SECS`: query timeout in seconds
    /// - `PLACES_DISTANCE_FORMULA`: `haversine` or `vincenty`
    ///
    /// # Errors
    ///
    /// Fails when an explicit path does not exist, the file does not parse,
    /// an override is malformed, or the resulting values are inconsistent.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(p) = path {
            if !Path::new(p).exists() {
                return Err(Error::config_not_found(p));
            }
        }

        let config_path = path.map(String::from).or_else(find_config_file);

        let schema = if let Some(ref p) = config_path {
            tracing::debug!(path = %p, "loading configuration");
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        let mut config = Self {
            schema,
            path: config_path,
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load with defaults only (no file, no environment)
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(data_path) = env::var("PLACES_DATA_PATH") {
            self.schema.store.data_path = data_path;
        }

        if let Ok(level) = env::var("PLACES_LOG_LEVEL") {
            self.schema.logging.level = level;
        }

        if let Ok(secs) = env::var("PLACES_QUERY_TIMEOUT_SECS") {
            self.schema.service.query_timeout_secs = secs.trim().parse().map_err(|_| {
                Error::new(
                    crate::ErrorCode::InvalidConfigValue,
                    format!("PLACES_QUERY_TIMEOUT_SECS is not a whole number: {secs}"),
                )
            })?;
        }

        if let Ok(formula) = env::var("PLACES_DISTANCE_FORMULA") {
            self.schema.nearby.formula = formula.parse::<DistanceFormula>().map_err(|e| {
                Error::new(
                    crate::ErrorCode::InvalidConfigValue,
                    format!("PLACES_DISTANCE_FORMULA: {e}"),
                )
                .with_suggestion("Use 'haversine' or 'vincenty'")
                .with_source(e)
            })?;
        }

        Ok(())
    }

    /// Check that defaults and caps are consistent.
    ///
    /// # Errors
    ///
    /// Returns a configuration validation error describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let nearby = &self.schema.nearby;

        if !(nearby.default_radius_km.is_finite() && nearby.default_radius_km > 0.0) {
            return Err(Error::config_invalid("nearby.default_radius_km must be positive"));
        }
        if !(nearby.max_radius_km.is_finite() && nearby.max_radius_km > 0.0) {
            return Err(Error::config_invalid("nearby.max_radius_km must be positive"));
        }
        if nearby.default_radius_km > nearby.max_radius_km {
            return Err(Error::config_invalid(
                "nearby.default_radius_km exceeds nearby.max_radius_km",
            ));
        }
        if nearby.default_limit == 0 || nearby.max_limit == 0 {
            return Err(Error::config_invalid("nearby limits must be at least 1"));
        }
        if nearby.default_limit > nearby.max_limit {
            return Err(Error::config_invalid(
                "nearby.default_limit exceeds nearby.max_limit",
            ));
        }
        if self.schema.service.query_timeout_secs == 0 {
            return Err(Error::config_invalid("service.query_timeout_secs must be at least 1"));
        }

        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        ".places-nearby.toml",
        "places-nearby.toml",
        ".config/places-nearby.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(ToString::to_string)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file {path}: {e}")).with_source(e))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Reading {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::defaults();
        assert!(config.path.is_none());
        assert_eq!(config.schema.nearby.default_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[nearby]\ndefault_radius_km = 2.5\nmax_limit = 20\n\n[logging]\njson = true"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = Config::load(Some(path)).unwrap();

        assert_eq!(config.path.as_deref(), Some(path));
        assert_eq!(config.schema.nearby.default_radius_km, 2.5);
        assert_eq!(config.schema.nearby.max_limit, 20);
        assert!(config.schema.logging.json);
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[nearby\ndefault_limit = ").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }

    #[test]
    fn test_validate_rejects_default_above_cap() {
        let mut config = Config::defaults();
        config.schema.nearby.default_limit = 100;
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigValidationError);

        let mut config = Config::defaults();
        config.schema.nearby.default_radius_km = 0.0;
        assert!(config.validate().is_err());
    }
}
