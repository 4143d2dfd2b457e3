//! In-memory place store with one R-tree per category.
//!
//! Every place with a usable position is indexed at load time under its
//! normalized `[lng, lat]`. A radius query asks the tree for the bounding box of
//! the search circle, then keeps the points whose great-circle distance is
//! within the radius. Places without a position stay resolvable by id but never
//! enter the tree.

use crate::{load_documents, Category, Place, PlaceId, PlaceStore, Result};
use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;
use tourism_geo::{haversine_distance, normalize, Coordinate, EARTH_RADIUS_KM};

/// Slack added around the search box so points exactly on the circle survive rounding.
const ENVELOPE_SLACK_DEG: f64 = 1e-9;

/// A place position in the R-tree, pointing back into the collection.
#[derive(Debug, Clone, Copy)]
struct IndexedPlace {
    /// `[lng, lat]`
    position: [f64; 2],
    slot: usize,
}

impl IndexedPlace {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.position[1], self.position[0])
    }
}

impl RTreeObject for IndexedPlace {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// One category's documents plus its spatial index.
#[derive(Default)]
struct Collection {
    places: Vec<Place>,
    by_id: HashMap<PlaceId, usize>,
    index: RTree<IndexedPlace>,
}

impl Collection {
    fn build(places: Vec<Place>) -> Self {
        let by_id = places
            .iter()
            .enumerate()
            .map(|(slot, place)| (place.id.clone(), slot))
            .collect();

        let entries: Vec<IndexedPlace> = places
            .iter()
            .enumerate()
            .filter_map(|(slot, place)| {
                normalize(place).map(|coord| IndexedPlace {
                    position: [coord.longitude, coord.latitude],
                    slot,
                })
            })
            .collect();

        Self {
            places,
            by_id,
            index: RTree::bulk_load(entries),
        }
    }

    fn within_radius(&self, center: Coordinate, radius_km: f64) -> Vec<Place> {
        let mut found = Vec::new();

        for envelope in search_envelopes(center, radius_km) {
            for entry in self.index.locate_in_envelope(&envelope) {
                let place = &self.places[entry.slot];
                if !place.is_public() {
                    continue;
                }
                if haversine_distance(&center, &entry.coordinate()) <= radius_km {
                    found.push(place.clone());
                }
            }
        }

        found
    }
}

/// Bounding boxes (in `[lng, lat]` degrees) covering a spherical cap.
///
/// Two boxes when the cap straddles the antimeridian, a full-longitude band
/// when it contains a pole.
fn search_envelopes(center: Coordinate, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let angular = radius_km / EARTH_RADIUS_KM;
    if angular >= PI {
        return vec![AABB::from_corners([-180.0, -90.0], [180.0, 90.0])];
    }

    let lat = center.latitude.to_radians();
    let lng = center.longitude.to_radians();
    let min_lat = lat - angular;
    let max_lat = lat + angular;

    if min_lat <= -FRAC_PI_2 || max_lat >= FRAC_PI_2 {
        return vec![AABB::from_corners(
            [-180.0, min_lat.max(-FRAC_PI_2).to_degrees() - ENVELOPE_SLACK_DEG],
            [180.0, max_lat.min(FRAC_PI_2).to_degrees() + ENVELOPE_SLACK_DEG],
        )];
    }

    let delta_lng = (angular.sin() / lat.cos()).min(1.0).asin();
    let min_lat = min_lat.to_degrees() - ENVELOPE_SLACK_DEG;
    let max_lat = max_lat.to_degrees() + ENVELOPE_SLACK_DEG;
    let min_lng = (lng - delta_lng).to_degrees() - ENVELOPE_SLACK_DEG;
    let max_lng = (lng + delta_lng).to_degrees() + ENVELOPE_SLACK_DEG;

    if min_lng < -180.0 {
        vec![
            AABB::from_corners([min_lng + 360.0, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lng, max_lat]),
        ]
    } else if max_lng > 180.0 {
        vec![
            AABB::from_corners([min_lng, min_lat], [180.0, max_lat]),
            AABB::from_corners([-180.0, min_lat], [max_lng - 360.0, max_lat]),
        ]
    } else {
        vec![AABB::from_corners([min_lng, min_lat], [max_lng, max_lat])]
    }
}

/// Per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    /// Documents in the collection
    pub total: usize,
    /// Documents with a usable position
    pub indexed: usize,
    /// Documents visible to visitors
    pub public: usize,
}

/// Spatially indexed, read-only place store held in memory.
///
/// Built once, then shared; queries take `&self` and never mutate.
#[derive(Default)]
pub struct MemoryStore {
    collections: BTreeMap<Category, Collection>,
}

impl MemoryStore {
    /// Builds the store and its indexes.
    ///
    /// Documents without an id get a generated one. A repeated id within a
    /// category keeps the first document.
    pub fn from_places(places: impl IntoIterator<Item = Place>) -> Self {
        let mut grouped: BTreeMap<Category, Vec<Place>> = BTreeMap::new();
        let mut seen: BTreeMap<Category, std::collections::HashSet<PlaceId>> = BTreeMap::new();

        for mut place in places {
            if place.id.is_empty() {
                place.id = PlaceId::generate();
            }
            if !seen.entry(place.category).or_default().insert(place.id.clone()) {
                tracing::warn!(id = %place.id, category = %place.category, "skipping duplicate place id");
                continue;
            }
            grouped.entry(place.category).or_default().push(place);
        }

        let collections: BTreeMap<Category, Collection> = grouped
            .into_iter()
            .map(|(category, places)| (category, Collection::build(places)))
            .collect();

        for (category, collection) in &collections {
            tracing::info!(
                category = %category,
                total = collection.places.len(),
                indexed = collection.index.size(),
                "indexed place collection"
            );
        }

        Self { collections }
    }

    /// Loads documents from a JSON file and builds the store.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not hold place documents.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_places(load_documents(path)?))
    }

    /// Number of places across every category.
    pub fn len(&self) -> usize {
        self.collections.values().map(|c| c.places.len()).sum()
    }

    /// True when no category holds any place.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counts per category; categories without documents report zeros.
    pub fn stats(&self) -> BTreeMap<Category, CategoryStats> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let stats = self
                    .collections
                    .get(&category)
                    .map(|collection| CategoryStats {
                        total: collection.places.len(),
                        indexed: collection.index.size(),
                        public: collection.places.iter().filter(|p| p.is_public()).count(),
                    })
                    .unwrap_or_default();
                (category, stats)
            })
            .collect()
    }

    fn lookup(&self, category: Category, id: &PlaceId) -> Option<Place> {
        let collection = self.collections.get(&category)?;
        let slot = *collection.by_id.get(id)?;
        Some(collection.places[slot].clone())
    }

    fn radius_query(&self, category: Category, center: Coordinate, radius_km: f64) -> Vec<Place> {
        if !(radius_km.is_finite() && radius_km >= 0.0) {
            return Vec::new();
        }
        self.collections
            .get(&category)
            .map(|collection| collection.within_radius(center, radius_km))
            .unwrap_or_default()
    }
}

impl PlaceStore for MemoryStore {
    async fn find_by_id(&self, category: Category, id: &PlaceId) -> Result<Option<Place>> {
        Ok(self.lookup(category, id))
    }

    async fn find_within_radius(
        &self,
        category: Category,
        center: Coordinate,
        radius_km: f64,
    ) -> Result<Vec<Place>> {
        Ok(self.radius_query(category, center, radius_km))
    }
}
