//! Batch distance annotation with optional parallelism.
//!
//! Annotates every candidate of a nearby query from one origin. Items without
//! a usable position come back as `None` so the caller can drop them.

use crate::{normalize, Coordinate, DistanceFormula, Locatable};
use serde::Serialize;

/// Distance of one item from the origin, with the position it was measured at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Annotation {
    /// The item's normalized position
    pub coordinate: Coordinate,
    /// Distance from the origin in kilometers
    pub distance_km: f64,
}

/// Calculate the distance from `origin` to each item, in input order.
///
/// # Arguments
/// * `origin` - Reference point
/// * `items` - Records carrying a stored location
/// * `formula` - Distance formula to apply
///
/// # Returns
/// One entry per input item: `Some(annotation)` or `None` when the item has no usable position.
pub fn annotate_distances<T>(
    origin: &Coordinate,
    items: &[T],
    formula: DistanceFormula,
) -> Vec<Option<Annotation>>
where
    T: Locatable + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| distance_to(origin, item, formula))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .map(|item| distance_to(origin, item, formula))
            .collect()
    }
}

#[inline]
fn distance_to<T: Locatable>(
    origin: &Coordinate,
    item: &T,
    formula: DistanceFormula,
) -> Option<Annotation> {
    normalize(item).map(|coordinate| Annotation {
        coordinate,
        distance_km: formula.distance_km(origin, &coordinate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoPoint;

    struct Item {
        location: Option<GeoPoint>,
        legacy: Option<(f64, f64)>,
    }

    impl Locatable for Item {
        fn point(&self) -> Option<&GeoPoint> {
            self.location.as_ref()
        }

        fn legacy_coordinates(&self) -> Option<(f64, f64)> {
            self.legacy
        }
    }

    fn create_test_items() -> Vec<Item> {
        vec![
            // Ho Guom, canonical
            Item {
                location: Some(GeoPoint::from_coordinate(Coordinate::new(21.0285, 105.8542))),
                legacy: None,
            },
            // West Lake, legacy
            Item {
                location: None,
                legacy: Some((21.0583, 105.8194)),
            },
            // Never geocoded
            Item {
                location: None,
                legacy: Some((0.0, 0.0)),
            },
        ]
    }

    #[test]
    fn test_annotations_follow_input_order() {
        let van_mieu = Coordinate::new(21.0278, 105.8342);
        let results = annotate_distances(&van_mieu, &create_test_items(), DistanceFormula::Haversine);

        assert_eq!(results.len(), 3);
        let ho_guom = results[0].unwrap();
        assert!((ho_guom.distance_km - 2.077).abs() < 0.01);
        assert_eq!(ho_guom.coordinate, Coordinate::new(21.0285, 105.8542));

        let west_lake = results[1].unwrap();
        assert!(west_lake.distance_km > 3.0 && west_lake.distance_km < 4.0);

        assert!(results[2].is_none());
    }

    #[test]
    fn test_empty_input() {
        let origin = Coordinate::new(21.0278, 105.8342);
        let items: Vec<Item> = Vec::new();
        assert!(annotate_distances(&origin, &items, DistanceFormula::Haversine).is_empty());
    }
}
