//! Result rows returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tourism_geo::Annotation;
use tourism_places::{Category, Place, PlaceId};

/// A place near the query's source, with its distance attached.
///
/// `distance` is in kilometers and present on every row; UI consumers rely on
/// it being a number. It exists only on results and is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    pub distance: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// The rest of the document (address, images, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl NearbyPlace {
    pub(crate) fn new(place: Place, annotation: Annotation) -> Self {
        let mut details = place.extra;
        // A stale stored distance must not shadow the computed one.
        details.remove("distance");

        Self {
            id: place.id,
            name: place.name,
            category: place.category,
            distance: annotation.distance_km,
            latitude: annotation.coordinate.latitude,
            longitude: annotation.coordinate.longitude,
            details,
        }
    }
}
