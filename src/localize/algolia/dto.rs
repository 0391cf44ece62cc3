//! Algolia Places API Data Transfer Objects
//!
//! Request and response shapes of `POST /1/places/query`.
//! DO NOT use these types outside the algolia module.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query body
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    /// `city` or `country`
    #[serde(rename = "type")]
    pub kind: &'a str,
    /// Free text to search for
    pub query: &'a str,
}

/// Query response
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub hits: Vec<Hit>,
    pub nb_hits: Option<u64>,
    pub query: Option<String>,
}

/// One matching place
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hit {
    /// Locale code → list of names, most common first
    ///
    /// Kept untyped so unknown locales with odd values do not break parsing.
    pub locale_names: Map<String, Value>,
    pub is_city: Option<bool>,
    pub is_country: Option<bool>,
    pub country_code: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
