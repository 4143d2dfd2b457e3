//! The request contract spoken by HTTP handlers and the CLI.

use crate::{NearbyError, Result};
use serde::{Deserialize, Serialize};
use tourism_core::config::NearbyConfig;
use tourism_places::{Category, PlaceId};

/// A nearby request as it arrives from the outside, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyRequest {
    /// Category of the source place, singular or plural
    pub source_category: String,

    /// Identifier of the source place
    pub source_id: String,

    /// Category to search in
    pub target_category: String,

    /// Search radius in kilometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    /// Maximum number of results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// A validated request with defaults and caps applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub source_id: PlaceId,
    pub source_category: Category,
    pub target_category: Category,
    pub radius_km: f64,
    pub limit: usize,
}

impl NearbyRequest {
    /// Request with the three required fields and no radius or limit.
    pub fn new(
        source_category: impl Into<String>,
        source_id: impl Into<String>,
        target_category: impl Into<String>,
    ) -> Self {
        Self {
            source_category: source_category.into(),
            source_id: source_id.into(),
            target_category: target_category.into(),
            radius: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check the request and resolve it into a [`NearbyQuery`].
    ///
    /// Missing radius and limit take the configured defaults; values above the
    /// configured caps are clamped down to them.
    ///
    /// # Errors
    ///
    /// [`NearbyError::UnknownCategory`] for a category that names no
    /// collection, [`NearbyError::InvalidParameter`] for an empty source id, a
    /// radius that is not a positive finite number, or a limit below one.
    pub fn validate(&self, limits: &NearbyConfig) -> Result<NearbyQuery> {
        let source_category: Category = self.source_category.parse()?;
        let target_category: Category = self.target_category.parse()?;

        let source_id = self.source_id.trim();
        if source_id.is_empty() {
            return Err(NearbyError::invalid("sourceId", "must not be empty"));
        }

        let radius_km = self.radius.unwrap_or(limits.default_radius_km);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(NearbyError::invalid(
                "radius",
                format!("must be a positive number of kilometers, got {radius_km}"),
            ));
        }

        let limit = match self.limit {
            None => limits.default_limit,
            Some(limit) if limit < 1 => {
                return Err(NearbyError::invalid(
                    "limit",
                    format!("must be at least 1, got {limit}"),
                ));
            }
            Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
        };

        let query = NearbyQuery {
            source_id: PlaceId::new(source_id),
            source_category,
            target_category,
            radius_km: radius_km.min(limits.max_radius_km),
            limit: limit.min(limits.max_limit),
        };

        if query.radius_km < radius_km || query.limit < limit {
            tracing::debug!(
                requested_radius_km = radius_km,
                requested_limit = limit,
                radius_km = query.radius_km,
                limit = query.limit,
                "nearby request clamped to configured caps"
            );
        }

        Ok(query)
    }
}
