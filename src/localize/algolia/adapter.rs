//! Adapter layer: Convert Algolia DTOs to an [`AltNameSet`]

use super::dto;
use crate::localize::domain::{AltNameSet, LocalizeError};
use crate::localize::extract;

/// Decode a query response body and extract names from the first hit.
///
/// Algolia has no international name of its own; the caller supplies one.
pub fn to_alt_names(
    body: &str,
    international_name: Option<&str>,
) -> Result<AltNameSet, LocalizeError> {
    let response: dto::QueryResponse = extract::decode(body)?;
    let first = response
        .hits
        .into_iter()
        .next()
        .ok_or(LocalizeError::NoMatch)?;

    let mut set = extract::names_from_locale_lists(&first.locale_names)?;
    set.international_name = international_name.map(str::to_string);
    Ok(set)
}
