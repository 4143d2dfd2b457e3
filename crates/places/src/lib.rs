//! Place listings and the spatially indexed store behind nearby queries.
//!
//! This crate provides:
//! - The place document model shared by all four listing categories
//! - The [`PlaceStore`] trait: lookup by id and radius queries, nothing else
//! - [`MemoryStore`], an R-tree backed implementation loaded from JSON documents
//! - The one-shot legacy → canonical coordinate migration

mod category;
mod documents;
mod error;
mod memory;
mod place;
mod store;
pub mod migrate;

pub use category::{Category, ParseCategoryError};
pub use documents::{load_documents, parse_documents, save_documents, to_json};
pub use error::{Result, StoreError, StoreErrorCode};
pub use memory::{CategoryStats, MemoryStore};
pub use migrate::{
    migrate_place, migrate_places, migrate_places_with, MigrationOutcome, MigrationReport,
};
pub use place::{Place, PlaceId};
pub use store::PlaceStore;
