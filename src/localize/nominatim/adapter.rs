//! Adapter layer: Convert Nominatim DTOs to an [`AltNameSet`]
//!
//! This is the ONLY place where Nominatim-shaped responses become domain
//! types, for both the Nominatim and the MapQuest backend.

use super::dto;
use crate::localize::domain::{AltNameSet, LocalizeError};
use crate::localize::extract;

/// Decode a search response body and extract names from its first place.
pub fn to_alt_names(body: &str) -> Result<AltNameSet, LocalizeError> {
    let places: dto::SearchResponse = extract::decode(body)?;
    let first = places.into_iter().next().ok_or(LocalizeError::NoMatch)?;
    extract::names_from_tags(&first.namedetails)
}
