//! The store seam nearby queries run against.

use crate::{Category, Place, PlaceId, Result};
use std::future::Future;
use std::sync::Arc;
use tourism_geo::Coordinate;

/// Read access to the place collections.
///
/// There is no "list everything" operation. Proximity is answered by the
/// store's spatial index through [`PlaceStore::find_within_radius`].
pub trait PlaceStore: Send + Sync {
    /// Looks a place up by id within its category's collection.
    fn find_by_id(
        &self,
        category: Category,
        id: &PlaceId,
    ) -> impl Future<Output = Result<Option<Place>>> + Send;

    /// Public places of `category` whose location lies within `radius_km` of `center`.
    ///
    /// Order is unspecified.
    fn find_within_radius(
        &self,
        category: Category,
        center: Coordinate,
        radius_km: f64,
    ) -> impl Future<Output = Result<Vec<Place>>> + Send;
}

impl<S: PlaceStore> PlaceStore for Arc<S> {
    fn find_by_id(
        &self,
        category: Category,
        id: &PlaceId,
    ) -> impl Future<Output = Result<Option<Place>>> + Send {
        (**self).find_by_id(category, id)
    }

    fn find_within_radius(
        &self,
        category: Category,
        center: Coordinate,
        radius_km: f64,
    ) -> impl Future<Output = Result<Vec<Place>>> + Send {
        (**self).find_within_radius(category, center, radius_km)
    }
}
