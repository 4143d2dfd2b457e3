//! Nearby-places queries across listing categories.
//!
//! The [`NearbyEngine`] answers "what is near this place?" for any pair of
//! categories: it resolves the source, normalizes its position, lets the
//! store's spatial index pick the candidates inside the radius, then annotates
//! and ranks them by distance. [`NearbyService`] wraps the engine with the
//! request contract an HTTP handler speaks: defaults, validation, caps and a
//! timeout.
//!
//! # Example
//!
//! ```
//! use tourism_nearby::NearbyEngine;
//! use tourism_places::{Category, MemoryStore, Place, PlaceId};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::from_places(vec![
//!     Place::new("van-mieu", "Văn Miếu", Category::Attraction).with_point(21.0278, 105.8342),
//!     Place::new("pho-thin", "Phở Thìn", Category::Cuisine).with_point(21.0187, 105.8553),
//! ]);
//! let engine = NearbyEngine::new(store);
//!
//! let nearby = engine
//!     .find_nearby(&PlaceId::from("van-mieu"), Category::Attraction, Category::Cuisine, 5.0, 10)
//!     .await
//!     .unwrap();
//! assert_eq!(nearby[0].name, "Phở Thìn");
//! # });
//! ```

mod engine;
mod error;
mod request;
mod response;
mod service;

pub use engine::NearbyEngine;
pub use error::{NearbyError, NearbyErrorCode, Result};
pub use request::{NearbyQuery, NearbyRequest};
pub use response::NearbyPlace;
pub use service::NearbyService;
