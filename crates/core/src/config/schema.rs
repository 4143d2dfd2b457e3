//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use tourism_geo::DistanceFormula;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Site-wide settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Nearby query defaults and caps
    #[serde(default)]
    pub nearby: NearbyConfig,

    /// Place store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Query service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Site name, shown in CLI headers
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
        }
    }
}

fn default_site_name() -> String {
    "Hanoi Travel".to_string()
}

/// Nearby query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyConfig {
    /// Radius used when a request does not give one
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,

    /// Limit used when a request does not give one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Larger requested radii are clamped to this
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,

    /// Larger requested limits are clamped to this
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Formula for displayed distances
    #[serde(default)]
    pub formula: DistanceFormula,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            default_limit: default_limit(),
            max_radius_km: default_max_radius_km(),
            max_limit: default_max_limit(),
            formula: DistanceFormula::default(),
        }
    }
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_limit() -> usize {
    10
}

fn default_max_radius_km() -> f64 {
    50.0
}

fn default_max_limit() -> usize {
    50
}

/// Place store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON array of place documents
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

fn default_data_path() -> String {
    "data/places.json".to_string()
}

/// Query service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Upper bound on a single nearby query, store round-trip included
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

fn default_query_timeout_secs() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
