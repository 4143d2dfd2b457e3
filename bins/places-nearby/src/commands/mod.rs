//! Subcommand implementations.

pub mod compare;
pub mod migrate;
pub mod nearby;
pub mod stats;

use std::path::{Path, PathBuf};
use tourism_cli::progress;
use tourism_core::config::Config;
use tourism_core::{Error, ErrorCode};
use tourism_places::{MemoryStore, StoreError};

/// Data file from the command line, or the configured one.
fn data_path(config: &Config, data: Option<PathBuf>) -> PathBuf {
    data.unwrap_or_else(|| PathBuf::from(&config.schema.store.data_path))
}

/// Load documents from `path` and build the indexed store.
fn load_store(path: &Path) -> tourism_core::Result<MemoryStore> {
    let spinner = progress::spinner(&format!("Loading {}", path.display()));
    match tourism_telemetry::timed("load_store", || MemoryStore::from_json_file(path)) {
        Ok(store) => {
            progress::finish_success(&spinner, &format!("Indexed {} places", store.len()));
            Ok(store)
        }
        Err(e) => {
            progress::finish_error(&spinner, "Failed to load places");
            Err(store_error(e))
        }
    }
}

/// Map a store failure onto a coded error.
fn store_error(err: StoreError) -> Error {
    let error = match &err {
        StoreError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
            Error::new(ErrorCode::DataError, format!("Place data not found: {}", path.display()))
                .with_suggestion("Pass --data or set store.data_path / PLACES_DATA_PATH")
        }
        StoreError::Io { .. } => Error::new(ErrorCode::DataError, err.to_string()),
        StoreError::Json(_) => Error::new(ErrorCode::InvalidDocument, err.to_string()),
        StoreError::Unavailable(_) => Error::new(ErrorCode::StoreUnavailable, err.to_string()),
    };
    error.with_source(err)
}
