//! Reading and writing place documents as JSON.
//!
//! Two layouts are accepted on input:
//! - a flat array of documents, each carrying its `category`
//! - an export keyed by collection: `{"attractions": [...], "cuisines": [...]}`
//!
//! Documents are always written back as a flat array grouped by category.

use crate::{Category, Place, Result, StoreError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentSet {
    Flat(Vec<Place>),
    ByCollection(BTreeMap<String, Vec<Value>>),
}

/// Parses documents from JSON text.
///
/// # Errors
///
/// Fails on malformed JSON, unknown collection names, or documents that are
/// not places. Unreadable coordinate fields are not errors: they load as
/// absent and the place is left out of proximity queries.
pub fn parse_documents(json: &str) -> Result<Vec<Place>> {
    match serde_json::from_str::<DocumentSet>(json) {
        Ok(DocumentSet::Flat(places)) => Ok(places),
        Ok(DocumentSet::ByCollection(collections)) => from_collections(collections),
        // Untagged errors are vague; rerun the flat parse for a useful message.
        Err(_) => Ok(serde_json::from_str::<Vec<Place>>(json)?),
    }
}

fn from_collections(collections: BTreeMap<String, Vec<Value>>) -> Result<Vec<Place>> {
    let mut places = Vec::new();

    for (name, documents) in collections {
        let category: Category = name.parse().map_err(|_| {
            StoreError::Json(serde::de::Error::custom(format!("unknown collection: {name}")))
        })?;

        for mut document in documents {
            if let Value::Object(ref mut fields) = document {
                fields
                    .entry("category")
                    .or_insert_with(|| Value::String(category.as_str().to_string()));
            }
            places.push(serde_json::from_value(document)?);
        }
    }

    Ok(places)
}

/// Reads documents from a JSON file.
///
/// # Errors
///
/// Fails when the file cannot be read or does not hold place documents.
pub fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Place>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let places = parse_documents(&content)?;
    tracing::info!(path = %path.display(), count = places.len(), "loaded place documents");
    Ok(places)
}

/// Serializes documents as a pretty-printed flat array, grouped by category
/// with the original order kept inside each group.
///
/// # Errors
///
/// Fails only if a document holds values JSON cannot represent.
pub fn to_json(places: &[Place]) -> Result<String> {
    let mut ordered: Vec<&Place> = places.iter().collect();
    ordered.sort_by_key(|place| place.category);
    Ok(serde_json::to_string_pretty(&ordered)?)
}

/// Writes documents to a JSON file.
///
/// # Errors
///
/// Fails when the file cannot be written.
pub fn save_documents(path: impl AsRef<Path>, places: &[Place]) -> Result<()> {
    let path = path.as_ref();
    let mut json = to_json(places)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
    tracing::info!(path = %path.display(), count = places.len(), "saved place documents");
    Ok(())
}
