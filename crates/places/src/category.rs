//! Listing categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The four kinds of listing the site publishes. Each lives in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Category {
    /// Hotels, homestays, hostels
    Accommodation,
    /// Sights, museums, landmarks
    Attraction,
    /// Restaurants, street food, cafés
    Cuisine,
    /// Bars, theatres, nightlife
    Entertainment,
}

impl Category {
    /// Every category, in collection order.
    pub const ALL: [Category; 4] = [
        Category::Accommodation,
        Category::Attraction,
        Category::Cuisine,
        Category::Entertainment,
    ];

    /// Singular lowercase name, as stored on documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Attraction => "attraction",
            Self::Cuisine => "cuisine",
            Self::Entertainment => "entertainment",
        }
    }

    /// Collection name in the document database.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodations",
            Self::Attraction => "attractions",
            Self::Cuisine => "cuisines",
            Self::Entertainment => "entertainments",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category name that matches none of the listings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| name == category.as_str() || name == category.collection())
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.as_str()
    }
}
