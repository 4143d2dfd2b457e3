//! Coordinate normalization for place documents.
//!
//! Listings store their position in one of two shapes, left over from an
//! in-place migration:
//! - canonical GeoJSON Point: `{"type": "Point", "coordinates": [lng, lat]}`
//! - legacy scalar fields: `latitude` / `longitude`
//!
//! [`StoredLocation::resolve`] picks the authoritative one once, so nothing
//! downstream needs to know which shape a record used.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// GeoJSON type discriminator for points.
pub const POINT_TYPE: &str = "Point";

fn point_type() -> String {
    POINT_TYPE.to_string()
}

/// GeoJSON Point as persisted on place documents.
///
/// `coordinates` is kept as a vector so malformed documents still load; the
/// length is checked when the point is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Should be "Point"
    #[serde(rename = "type", default = "point_type")]
    pub point_type: String,
    /// [longitude, latitude] array
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    /// Builds a canonical point; longitude goes first.
    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self {
            point_type: point_type(),
            coordinates: vec![coord.longitude, coord.latitude],
        }
    }

    /// Reads the `[lng, lat]` pair. Returns `None` unless there are exactly two elements.
    pub fn to_coordinate(&self) -> Option<Coordinate> {
        match self.coordinates.as_slice() {
            [lng, lat] => Some(Coordinate::new(*lat, *lng)),
            _ => None,
        }
    }
}

/// Anything that carries a position in one of the stored shapes.
pub trait Locatable {
    /// The canonical point, when the record has one.
    fn point(&self) -> Option<&GeoPoint>;

    /// Legacy `(latitude, longitude)`, when both scalar fields are present.
    fn legacy_coordinates(&self) -> Option<(f64, f64)>;
}

/// Which representation supplied a record's usable coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoredLocation {
    /// Read from the GeoJSON Point
    Canonical(Coordinate),
    /// Read from the scalar latitude/longitude fields
    Legacy(Coordinate),
}

impl StoredLocation {
    /// Resolves the usable coordinate of a record.
    ///
    /// A usable Point wins over legacy fields. A Point that is the `[0, 0]`
    /// sentinel, malformed, or out of range counts as absent, and the legacy
    /// fields are consulted instead.
    pub fn resolve<L: Locatable + ?Sized>(item: &L) -> Option<Self> {
        if let Some(point) = item.point() {
            match point.to_coordinate() {
                Some(coord) if coord.is_usable() => return Some(Self::Canonical(coord)),
                Some(coord) if coord.is_unset() => {}
                Some(coord) => {
                    tracing::warn!(%coord, "ignoring out-of-range location point");
                }
                None => {
                    tracing::warn!(
                        len = point.coordinates.len(),
                        "ignoring location point without exactly two coordinates"
                    );
                }
            }
        }

        let (latitude, longitude) = item.legacy_coordinates()?;
        let coord = Coordinate::new(latitude, longitude);
        if coord.is_usable() {
            Some(Self::Legacy(coord))
        } else {
            if !coord.is_unset() {
                tracing::warn!(%coord, "ignoring out-of-range legacy coordinates");
            }
            None
        }
    }

    /// The resolved coordinate, whichever shape it came from.
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Canonical(coord) | Self::Legacy(coord) => *coord,
        }
    }

    /// True when the coordinate still lives only in the legacy fields.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Normalizes a record to `(latitude, longitude)`, or `None` when it has no
/// usable position and must be left out of proximity queries.
///
/// # Example
/// ```
/// use tourism_geo::{normalize, GeoPoint, Locatable};
///
/// struct Listing { location: Option<GeoPoint> }
///
/// impl Locatable for Listing {
///     fn point(&self) -> Option<&GeoPoint> { self.location.as_ref() }
///     fn legacy_coordinates(&self) -> Option<(f64, f64)> { None }
/// }
///
/// let listing = Listing {
///     location: Some(GeoPoint { point_type: "Point".into(), coordinates: vec![105.8542, 21.0285] }),
/// };
/// let coord = normalize(&listing).unwrap();
/// assert_eq!(coord.latitude, 21.0285);
/// assert_eq!(coord.longitude, 105.8542);
/// ```
pub fn normalize<L: Locatable + ?Sized>(item: &L) -> Option<crate::Coordinate> {
    StoredLocation::resolve(item).map(|location| location.coordinate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Record {
        location: Option<GeoPoint>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    }

    impl Locatable for Record {
        fn point(&self) -> Option<&GeoPoint> {
            self.location.as_ref()
        }

        fn legacy_coordinates(&self) -> Option<(f64, f64)> {
            Some((self.latitude?, self.longitude?))
        }
    }

    fn point(coordinates: Vec<f64>) -> Option<GeoPoint> {
        Some(GeoPoint {
            point_type: POINT_TYPE.to_string(),
            coordinates,
        })
    }

    #[test]
    fn test_point_is_longitude_first() {
        let record = Record {
            location: point(vec![105.8542, 21.0285]),
            ..Default::default()
        };

        let coord = normalize(&record).unwrap();
        assert_eq!(coord.latitude, 21.0285);
        assert_eq!(coord.longitude, 105.8542);
    }

    #[test]
    fn test_legacy_fields_used_directly() {
        let record = Record {
            latitude: Some(21.0278),
            longitude: Some(105.8342),
            ..Default::default()
        };

        let location = StoredLocation::resolve(&record).unwrap();
        assert!(location.is_legacy());
        assert_eq!(location.coordinate(), Coordinate::new(21.0278, 105.8342));
    }

    #[test]
    fn test_point_is_authoritative_over_legacy() {
        let record = Record {
            location: point(vec![105.8542, 21.0285]),
            latitude: Some(21.0278),
            longitude: Some(105.8342),
        };

        assert_eq!(
            StoredLocation::resolve(&record),
            Some(StoredLocation::Canonical(Coordinate::new(21.0285, 105.8542)))
        );
    }

    #[test]
    fn test_sentinel_in_both_shapes_is_none() {
        let record = Record {
            location: point(vec![0.0, 0.0]),
            latitude: Some(0.0),
            longitude: Some(0.0),
        };

        assert!(normalize(&record).is_none());
    }

    #[test]
    fn test_sentinel_point_falls_back_to_legacy() {
        let record = Record {
            location: point(vec![0.0, 0.0]),
            latitude: Some(21.0278),
            longitude: Some(105.8342),
        };

        assert_eq!(normalize(&record), Some(Coordinate::new(21.0278, 105.8342)));
    }

    #[test]
    fn test_malformed_point_is_ignored() {
        let record = Record {
            location: point(vec![105.8542]),
            ..Default::default()
        };
        assert!(normalize(&record).is_none());

        let record = Record {
            location: point(vec![105.8542, 21.0285, 12.0]),
            ..Default::default()
        };
        assert!(normalize(&record).is_none());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        // Swapped on entry: latitude 105 does not exist.
        let record = Record {
            latitude: Some(105.8342),
            longitude: Some(21.0278),
            ..Default::default()
        };
        assert!(normalize(&record).is_none());
    }

    #[test]
    fn test_missing_half_of_legacy_pair() {
        let record = Record {
            latitude: Some(21.0278),
            ..Default::default()
        };
        assert!(normalize(&record).is_none());
    }

    #[test]
    fn test_no_location_at_all() {
        assert!(normalize(&Record::default()).is_none());
    }

    #[test]
    fn test_geopoint_serde_shape() {
        let point = GeoPoint::from_coordinate(Coordinate::new(21.0285, 105.8542));
        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value, json!({"type": "Point", "coordinates": [105.8542, 21.0285]}));

        let parsed: GeoPoint = serde_json::from_value(json!({"coordinates": [105.8542, 21.0285]})).unwrap();
        assert_eq!(parsed.point_type, POINT_TYPE);
        assert_eq!(parsed, point);
    }
}
