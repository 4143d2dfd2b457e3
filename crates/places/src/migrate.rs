//! Back-fill canonical points from legacy latitude/longitude fields.
//!
//! Safe to run any number of times: a document whose point is already usable
//! is never touched, and legacy fields are left in place for older readers.

use crate::Place;
use serde::Serialize;
use tourism_geo::{GeoPoint, Locatable, StoredLocation};

/// What the migration did with one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// A canonical point was written from the legacy fields
    Migrated,
    /// The document already had a usable canonical point
    AlreadyCanonical,
    /// Legacy fields exist but hold the sentinel or out-of-range values
    Skipped,
    /// Neither representation is present
    NoCoordinates,
}

/// Counts per outcome for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub migrated: usize,
    pub already_canonical: usize,
    pub skipped: usize,
    pub no_coordinates: usize,
}

impl MigrationReport {
    /// Documents examined.
    pub fn total(&self) -> usize {
        self.migrated + self.already_canonical + self.skipped + self.no_coordinates
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: MigrationOutcome) {
        match outcome {
            MigrationOutcome::Migrated => self.migrated += 1,
            MigrationOutcome::AlreadyCanonical => self.already_canonical += 1,
            MigrationOutcome::Skipped => self.skipped += 1,
            MigrationOutcome::NoCoordinates => self.no_coordinates += 1,
        }
    }
}

/// Migrates a single document in place.
pub fn migrate_place(place: &mut Place) -> MigrationOutcome {
    match StoredLocation::resolve(place) {
        Some(StoredLocation::Canonical(_)) => MigrationOutcome::AlreadyCanonical,
        Some(StoredLocation::Legacy(coord)) => {
            place.location = Some(GeoPoint::from_coordinate(coord));
            tracing::debug!(id = %place.id, %coord, "back-filled canonical point");
            MigrationOutcome::Migrated
        }
        None if place.legacy_coordinates().is_some() || place.location.is_some() => {
            MigrationOutcome::Skipped
        }
        None => MigrationOutcome::NoCoordinates,
    }
}

/// Migrates every document and reports what happened.
pub fn migrate_places(places: &mut [Place]) -> MigrationReport {
    migrate_places_with(places, |_, _| {})
}

/// Like [`migrate_places`], calling `on_each` after every document.
pub fn migrate_places_with(
    places: &mut [Place],
    mut on_each: impl FnMut(&Place, MigrationOutcome),
) -> MigrationReport {
    let mut report = MigrationReport::default();
    for place in places.iter_mut() {
        let outcome = migrate_place(place);
        report.record(outcome);
        on_each(place, outcome);
    }

    tracing::info!(
        migrated = report.migrated,
        already_canonical = report.already_canonical,
        skipped = report.skipped,
        no_coordinates = report.no_coordinates,
        "coordinate migration finished"
    );
    report
}
