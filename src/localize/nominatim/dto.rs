//! Nominatim search API Data Transfer Objects
//!
//! These types match what `/search?format=json&namedetails=1` returns.
//! MapQuest's hosted Nominatim returns the same shape, so both backends
//! share them.
//!
//! API Reference: https://nominatim.org/release-docs/latest/api/Search/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search response: places ordered by relevance.
pub type SearchResponse = Vec<Place>;

/// A single search result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Place {
    /// OSM place id
    pub place_id: Option<u64>,
    /// Human readable name with hierarchy
    pub display_name: Option<String>,
    /// Place type (city, administrative, ...)
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    /// OSM name tags (`name`, `name:ru`, `int_name`, ...)
    ///
    /// Kept untyped: the set of tags differs from place to place.
    pub namedetails: Map<String, Value>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
