//! The nearby-query engine.

use crate::{NearbyPlace, Result};
use tourism_geo::{annotate_distances, normalize, DistanceFormula};
use tourism_places::{Category, PlaceId, PlaceStore};

/// Finds places of one category near a place of another (or the same) category.
///
/// Stateless apart from the store handle: every call is independent, nothing
/// is cached, and the store is only read.
pub struct NearbyEngine<S> {
    store: S,
    formula: DistanceFormula,
}

impl<S: PlaceStore> NearbyEngine<S> {
    /// Engine over `store`, using Haversine for displayed distances.
    pub fn new(store: S) -> Self {
        Self {
            store,
            formula: DistanceFormula::default(),
        }
    }

    /// Use a different formula for displayed distances, for every category alike.
    #[must_use]
    pub fn with_formula(mut self, formula: DistanceFormula) -> Self {
        self.formula = formula;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The formula applied to displayed distances.
    pub fn formula(&self) -> DistanceFormula {
        self.formula
    }

    /// Places of `target_category` within `radius_km` of the source place,
    /// nearest first, at most `limit` of them.
    ///
    /// Returns an empty list, not an error, when the source does not exist,
    /// has no usable position, or nothing is in range. A non-positive radius
    /// or a zero limit also yields an empty list without touching the store.
    ///
    /// # Errors
    ///
    /// [`NearbyError::StoreUnavailable`](crate::NearbyError::StoreUnavailable)
    /// when the store fails; no partial result is returned.
    pub async fn find_nearby(
        &self,
        source_id: &PlaceId,
        source_category: Category,
        target_category: Category,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<NearbyPlace>> {
        if limit == 0 || !(radius_km.is_finite() && radius_km > 0.0) {
            tracing::debug!(radius_km, limit, "empty nearby window");
            return Ok(Vec::new());
        }

        let Some(source) = self.store.find_by_id(source_category, source_id).await? else {
            tracing::debug!(id = %source_id, category = %source_category, "nearby source not found");
            return Ok(Vec::new());
        };

        let Some(origin) = normalize(&source) else {
            tracing::debug!(id = %source_id, category = %source_category, "nearby source has no coordinates");
            return Ok(Vec::new());
        };

        let mut candidates = self
            .store
            .find_within_radius(target_category, origin, radius_km)
            .await?;

        if source_category == target_category {
            candidates.retain(|place| place.id != source.id);
        }

        let annotations = annotate_distances(&origin, &candidates, self.formula);

        let mut results: Vec<NearbyPlace> = candidates
            .into_iter()
            .zip(annotations)
            .filter_map(|(place, annotation)| match annotation {
                Some(annotation) => Some(NearbyPlace::new(place, annotation)),
                None => {
                    tracing::warn!(id = %place.id, category = %place.category, "store returned a candidate without coordinates");
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(limit);

        tracing::debug!(
            source = %source_id,
            from = %source_category,
            to = %target_category,
            radius_km,
            found = results.len(),
            "nearby query answered"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NearbyError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tourism_geo::{haversine_distance, Coordinate};
    use tourism_places::{MemoryStore, Place, StoreError};

    const VAN_MIEU: Coordinate = Coordinate::new(21.0278, 105.8342);
    const HO_GUOM: Coordinate = Coordinate::new(21.0285, 105.8542);

    fn hanoi() -> MemoryStore {
        MemoryStore::from_places(vec![
            Place::new("van-mieu", "Văn Miếu", Category::Attraction).with_point(21.0278, 105.8342),
            Place::new("ho-guom", "Hồ Gươm", Category::Attraction).with_point(21.0285, 105.8542),
            Place::new("hoang-thanh", "Hoàng thành Thăng Long", Category::Attraction)
                .with_legacy(21.0368, 105.8347),
            Place::new("no-coords", "Đền chưa định vị", Category::Attraction)
                .with_point(0.0, 0.0)
                .with_legacy(0.0, 0.0),
            Place::new("pho-thin", "Phở Thìn", Category::Cuisine).with_point(21.0187, 105.8553),
            Place::new("bun-cha", "Bún chả Hương Liên", Category::Cuisine)
                .with_legacy(21.0180, 105.8520),
            Place::new("closed", "Quán đã đóng", Category::Cuisine)
                .with_point(21.0279, 105.8343)
                .with_visibility(Some(false), None),
            Place::new("metropole", "Sofitel Metropole", Category::Accommodation)
                .with_point(21.0257, 105.8562),
        ])
    }

    fn ids(results: &[NearbyPlace]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_van_mieu_to_ho_guom_within_5_km() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Attraction, 5.0, 10)
            .await
            .unwrap();

        let ho_guom = results.iter().find(|r| r.id.as_str() == "ho-guom").unwrap();
        assert!((ho_guom.distance - 1.8).abs() < 0.3, "distance: {}", ho_guom.distance);
        assert_eq!(ho_guom.distance, haversine_distance(&VAN_MIEU, &HO_GUOM));
    }

    #[tokio::test]
    async fn test_radius_edge_excludes_ho_guom_at_1_km() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Attraction, 1.0, 10)
            .await
            .unwrap();

        assert!(!ids(&results).contains(&"ho-guom"));
        assert!(results.iter().all(|r| r.distance <= 1.0));
    }

    #[tokio::test]
    async fn test_source_excluded_for_same_category() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Attraction, 10.0, 10)
            .await
            .unwrap();

        assert_eq!(ids(&results), vec!["hoang-thanh", "ho-guom"]);
    }

    #[tokio::test]
    async fn test_cross_category_sorted_and_public_only() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();

        // bun-cha ~2.1 km, pho-thin ~2.3 km; the closed shop next door is hidden.
        assert_eq!(ids(&results), vec!["bun-cha", "pho-thin"]);
        assert!(results.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!(results.iter().all(|r| r.category == Category::Cuisine));
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Attraction, 10.0, 1)
            .await
            .unwrap();

        assert_eq!(ids(&results), vec!["hoang-thanh"]);
    }

    #[tokio::test]
    async fn test_missing_source_is_empty() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"deleted".into(), Category::Attraction, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();
        assert!(results.is_empty());

        // Right id, wrong collection.
        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Cuisine, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_source_without_coordinates_is_empty() {
        let engine = NearbyEngine::new(hanoi());

        let results = engine
            .find_nearby(&"no-coords".into(), Category::Attraction, Category::Cuisine, 50.0, 10)
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_identical_queries_identical_results() {
        let engine = NearbyEngine::new(hanoi());

        let first = engine
            .find_nearby(&"metropole".into(), Category::Accommodation, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();
        let second = engine
            .find_nearby(&"metropole".into(), Category::Accommodation, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_equal_distances_tie_break_by_id() {
        let store = MemoryStore::from_places(vec![
            Place::new("center", "Center", Category::Attraction).with_point(21.0, 105.8),
            Place::new("c", "Quán góc", Category::Cuisine).with_legacy(21.01, 105.8),
            Place::new("a", "Quán giữa", Category::Cuisine).with_point(21.01, 105.8),
            Place::new("b", "Quán cuối", Category::Cuisine)
                .with_point(21.01, 105.8)
                .with_legacy(21.01, 105.8),
        ]);
        let engine = NearbyEngine::new(store);

        let results = engine
            .find_nearby(&"center".into(), Category::Attraction, Category::Cuisine, 5.0, 10)
            .await
            .unwrap();

        assert_eq!(ids(&results), vec!["a", "b", "c"]);
        assert_eq!(results[0].distance, results[1].distance);
        assert_eq!(results[1].distance, results[2].distance);

        let first_two = engine
            .find_nearby(&"center".into(), Category::Attraction, Category::Cuisine, 5.0, 2)
            .await
            .unwrap();
        assert_eq!(ids(&first_two), vec!["a", "b"]);
    }

    /// Store that refuses to answer and counts how often it was asked.
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    impl PlaceStore for BrokenStore {
        async fn find_by_id(&self, _: Category, _: &PlaceId) -> tourism_places::Result<Option<Place>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn find_within_radius(
            &self,
            _: Category,
            _: Coordinate,
            _: f64,
        ) -> tourism_places::Result<Vec<Place>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let engine = NearbyEngine::new(BrokenStore::default());

        let err = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Cuisine, 5.0, 10)
            .await
            .unwrap_err();

        assert!(matches!(err, NearbyError::StoreUnavailable(_)));
        assert_eq!(engine.store().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_degenerate_window_does_not_touch_store() {
        let engine = NearbyEngine::new(BrokenStore::default());

        for (radius, limit) in [(0.0, 10), (-3.0, 10), (f64::NAN, 10), (5.0, 0)] {
            let results = engine
                .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Cuisine, radius, limit)
                .await
                .unwrap();
            assert!(results.is_empty());
        }
        assert_eq!(engine.store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_vincenty_formula_applies_to_display_distance() {
        let engine = NearbyEngine::new(hanoi()).with_formula(DistanceFormula::Vincenty);

        let results = engine
            .find_nearby(&"van-mieu".into(), Category::Attraction, Category::Attraction, 5.0, 10)
            .await
            .unwrap();

        let ho_guom = results.iter().find(|r| r.id.as_str() == "ho-guom").unwrap();
        let expected = tourism_geo::vincenty_distance(&VAN_MIEU, &HO_GUOM).unwrap();
        assert_eq!(ho_guom.distance, expected);
    }
}
