//! Place documents.

use crate::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tourism_geo::{GeoPoint, Locatable};

/// Status values that make a listing visible to visitors.
const PUBLIC_STATUSES: [&str; 3] = ["published", "active", "public"];

/// Opaque place identifier assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the document came without an identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// Accepts plain strings, numbers, and extended-JSON `{"$oid": "..."}` exports.
impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
            ObjectId {
                #[serde(rename = "$oid")]
                oid: String,
            },
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) | RawId::ObjectId { oid: id } => Self(id),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

// Coordinate fields written by hand-edited forms are often strings, empty, or
// half-filled points. An unreadable value loads as absent so the place is left
// out of proximity queries instead of failing the whole file.
fn lenient_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Some(parsed),
            _ => {
                tracing::warn!(value = %text, "ignoring non-numeric coordinate");
                None
            }
        },
        other => {
            tracing::warn!(value = %other, "ignoring non-numeric coordinate");
            None
        }
    };
    Ok(value)
}

fn lenient_point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<GeoPoint>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value::<GeoPoint>(value) {
        Ok(point) => Ok(Some(point)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable location");
            Ok(None)
        }
    }
}

/// A listing of any category.
///
/// Fields the nearby queries do not care about (address, images, opening
/// hours, ...) are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "PlaceId::is_empty")]
    pub id: PlaceId,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    /// Canonical GeoJSON point, `[lng, lat]`
    #[serde(
        default,
        deserialize_with = "lenient_point",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<GeoPoint>,

    /// Legacy scalar latitude
    #[serde(
        default,
        alias = "lat",
        deserialize_with = "lenient_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,

    /// Legacy scalar longitude
    #[serde(
        default,
        alias = "lng",
        deserialize_with = "lenient_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    /// A bare place with no position, mostly useful for building fixtures.
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            location: None,
            latitude: None,
            longitude: None,
            is_active: None,
            status: None,
            extra: Map::new(),
        }
    }

    /// Sets the canonical point.
    #[must_use]
    pub fn with_point(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint::from_coordinate(tourism_geo::Coordinate::new(
            latitude, longitude,
        )));
        self
    }

    /// Sets the legacy scalar fields.
    #[must_use]
    pub fn with_legacy(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Sets the visibility flags.
    #[must_use]
    pub fn with_visibility(mut self, is_active: Option<bool>, status: Option<&str>) -> Self {
        self.is_active = is_active;
        self.status = status.map(String::from);
        self
    }

    /// Visible to visitors: not deactivated, and unpublished statuses excluded.
    /// Missing flags count as visible.
    pub fn is_public(&self) -> bool {
        self.is_active != Some(false)
            && self.status.as_deref().is_none_or(|status| {
                PUBLIC_STATUSES
                    .iter()
                    .any(|public| status.eq_ignore_ascii_case(public))
            })
    }
}

impl Locatable for Place {
    fn point(&self) -> Option<&GeoPoint> {
        self.location.as_ref()
    }

    fn legacy_coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}
