//! Request handling around the engine: validation, caps, timeout.

use crate::{NearbyEngine, NearbyError, NearbyPlace, NearbyQuery, NearbyRequest, Result};
use std::time::{Duration, Instant};
use tourism_core::config::{ConfigSchema, NearbyConfig};
use tourism_places::PlaceStore;

/// What an HTTP handler holds: an engine plus the configured request limits.
///
/// Safe to share across tasks behind an `Arc`; queries do not block each other.
pub struct NearbyService<S> {
    engine: NearbyEngine<S>,
    limits: NearbyConfig,
    timeout: Duration,
}

impl<S: PlaceStore> NearbyService<S> {
    pub fn new(store: S, config: &ConfigSchema) -> Self {
        Self {
            engine: NearbyEngine::new(store).with_formula(config.nearby.formula),
            limits: config.nearby.clone(),
            timeout: Duration::from_secs(config.service.query_timeout_secs),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn engine(&self) -> &NearbyEngine<S> {
        &self.engine
    }

    pub fn limits(&self) -> &NearbyConfig {
        &self.limits
    }

    /// Validate `request` and answer it.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before the store is consulted; otherwise
    /// the same errors as [`NearbyService::run`].
    pub async fn handle(&self, request: &NearbyRequest) -> Result<Vec<NearbyPlace>> {
        let query = request.validate(&self.limits)?;
        self.run(&query).await
    }

    /// Run an already validated query under the configured timeout.
    ///
    /// # Errors
    ///
    /// [`NearbyError::Timeout`] when the query outlives the timeout, or the
    /// engine's store error.
    pub async fn run(&self, query: &NearbyQuery) -> Result<Vec<NearbyPlace>> {
        let started = Instant::now();

        let results = tokio::time::timeout(
            self.timeout,
            self.engine.find_nearby(
                &query.source_id,
                query.source_category,
                query.target_category,
                query.radius_km,
                query.limit,
            ),
        )
        .await
        .map_err(|_| {
            tracing::warn!(
                source = %query.source_id,
                timeout_ms = self.timeout.as_millis() as u64,
                "nearby query timed out"
            );
            NearbyError::Timeout(self.timeout)
        })??;

        tracing::debug!(
            source = %query.source_id,
            results = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nearby request served"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tourism_geo::Coordinate;
    use tourism_places::{Category, MemoryStore, Place, PlaceId};

    fn hanoi() -> MemoryStore {
        MemoryStore::from_places(vec![
            Place::new("van-mieu", "Văn Miếu", Category::Attraction).with_point(21.0278, 105.8342),
            Place::new("ho-guom", "Hồ Gươm", Category::Attraction).with_point(21.0285, 105.8542),
            Place::new("pho-thin", "Phở Thìn", Category::Cuisine).with_point(21.0187, 105.8553),
            Place::new("metropole", "Sofitel Metropole", Category::Accommodation)
                .with_legacy(21.0257, 105.8562),
        ])
    }

    /// Wraps a store, counting calls and optionally stalling each one.
    struct SlowStore {
        inner: MemoryStore,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl SlowStore {
        fn new(delay: Duration) -> Self {
            Self {
                inner: hanoi(),
                delay,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PlaceStore for SlowStore {
        async fn find_by_id(
            &self,
            category: Category,
            id: &PlaceId,
        ) -> tourism_places::Result<Option<Place>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.inner.find_by_id(category, id).await
        }

        async fn find_within_radius(
            &self,
            category: Category,
            center: Coordinate,
            radius_km: f64,
        ) -> tourism_places::Result<Vec<Place>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.inner.find_within_radius(category, center, radius_km).await
        }
    }

    #[tokio::test]
    async fn test_handle_applies_defaults() {
        let service = NearbyService::new(hanoi(), &ConfigSchema::default());

        let results = service
            .handle(&NearbyRequest::new("attractions", "van-mieu", "accommodations"))
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "metropole");
        assert!(results[0].distance > 0.0 && results[0].distance < 5.0);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_store() {
        let service = NearbyService::new(SlowStore::new(Duration::ZERO), &ConfigSchema::default());

        let err = service
            .handle(&NearbyRequest::new("attraction", "van-mieu", "cuisine").with_radius(-1.0))
            .await
            .unwrap_err();
        assert!(err.is_client_error());

        let err = service
            .handle(&NearbyRequest::new("attraction", "van-mieu", "spa"))
            .await
            .unwrap_err();
        assert!(matches!(err, NearbyError::UnknownCategory(_)));

        assert_eq!(service.engine().store().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let service = NearbyService::new(SlowStore::new(Duration::from_secs(30)), &ConfigSchema::default())
            .with_timeout(Duration::from_millis(50));

        let err = service
            .handle(&NearbyRequest::new("attraction", "van-mieu", "cuisine"))
            .await
            .unwrap_err();

        assert!(matches!(err, NearbyError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_concurrent_requests() {
        let service = Arc::new(NearbyService::new(hanoi(), &ConfigSchema::default()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    let target = if i % 2 == 0 { "cuisine" } else { "attraction" };
                    service
                        .handle(&NearbyRequest::new("attraction", "van-mieu", target))
                        .await
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let results = handle.await.unwrap().unwrap();
            let expected = if i % 2 == 0 { "pho-thin" } else { "ho-guom" };
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].id.as_str(), expected);
        }
    }

    #[tokio::test]
    async fn test_formula_from_config() {
        let mut config = ConfigSchema::default();
        config.nearby.formula = tourism_geo::DistanceFormula::Vincenty;

        let service = NearbyService::new(hanoi(), &config);
        assert_eq!(service.engine().formula(), tourism_geo::DistanceFormula::Vincenty);
        assert_eq!(service.limits().max_limit, 50);
    }
}
