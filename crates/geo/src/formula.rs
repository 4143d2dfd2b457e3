//! Selectable distance formula.

use crate::{haversine_distance, vincenty_distance, Coordinate, GeoError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The formula used for displayed distances.
///
/// Whichever formula is chosen applies to every category, so distances shown
/// side by side are always comparable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceFormula {
    /// Spherical Earth, mean radius 6371 km
    #[default]
    Haversine,
    /// WGS-84 ellipsoid; falls back to Haversine when it does not converge
    Vincenty,
}

impl DistanceFormula {
    /// Distance in kilometers between two coordinates.
    #[inline]
    pub fn distance_km(self, from: &Coordinate, to: &Coordinate) -> f64 {
        match self {
            Self::Haversine => haversine_distance(from, to),
            Self::Vincenty => vincenty_distance(from, to).unwrap_or_else(|| {
                tracing::debug!(%from, %to, "vincenty did not converge, using haversine");
                haversine_distance(from, to)
            }),
        }
    }

    /// Lowercase name, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Haversine => "haversine",
            Self::Vincenty => "vincenty",
        }
    }
}

impl fmt::Display for DistanceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceFormula {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "haversine" | "spherical" => Ok(Self::Haversine),
            "vincenty" | "ellipsoidal" => Ok(Self::Vincenty),
            other => Err(GeoError::UnknownFormula(other.to_string())),
        }
    }
}
