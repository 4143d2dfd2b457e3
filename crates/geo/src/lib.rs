//! Geospatial primitives for the place listings.
//!
//! This crate provides:
//! - Coordinate normalization across the legacy scalar and GeoJSON Point shapes
//! - Haversine great-circle distance (the display distance everywhere)
//! - Optional ellipsoidal (Vincenty) and equirectangular estimates
//! - Batch distance annotation with optional parallelism
//!
//! # Example
//!
//! ```
//! use tourism_geo::{haversine_distance, Coordinate};
//!
//! let van_mieu = Coordinate::new(21.0278, 105.8342);
//! let ho_guom = Coordinate::new(21.0285, 105.8542);
//!
//! let distance_km = haversine_distance(&van_mieu, &ho_guom);
//! assert!((distance_km - 2.08).abs() < 0.05);
//! ```

mod error;
mod formula;
mod haversine;
mod location;
mod vincenty;
pub mod batch;

pub use batch::{annotate_distances, Annotation};
pub use error::{GeoError, GeoErrorCode, Result};
pub use formula::DistanceFormula;
pub use haversine::{
    approximate_distance, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM,
    EARTH_RADIUS_M,
};
pub use location::{normalize, GeoPoint, Locatable, StoredLocation, POINT_TYPE};
pub use vincenty::vincenty_distance;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both components are finite and inside the WGS84 ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Returns true for `(0, 0)`, the marker left on records that were never geocoded.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// A coordinate that can take part in proximity queries.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.is_valid() && !self.is_unset()
    }

    /// Parses `"lat,lng"` as typed on the command line.
    pub fn parse_pair(input: &str) -> Result<Self> {
        let (lat, lng) = input
            .split_once(',')
            .ok_or_else(|| GeoError::InvalidCoordinate(format!("expected 'lat,lng', got: {input}")))?;

        let latitude: f64 = lat
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(format!("invalid latitude: {lat}")))?;
        let longitude: f64 = lng
            .trim()
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(format!("invalid longitude: {lng}")))?;

        let coord = Self::new(latitude, longitude);
        if !coord.is_valid() {
            return Err(GeoError::OutOfRange { latitude, longitude });
        }
        Ok(coord)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
