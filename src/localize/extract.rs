//! Translation extraction helpers shared by the provider adapters.
//!
//! Policy, in order:
//! 1. body that is not JSON → `MalformedResponse`
//! 2. empty top-level array or object → `NoMatch`
//! 3. shape that does not fit the provider DTO → `MalformedResponse`
//! 4. only allow-listed locale keys are kept, others are ignored
//! 5. nothing left after filtering → `NoLocalizedName`

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::domain::{AltNameSet, Locale, LocalizeError};

/// Parse `body` into a provider DTO, separating "no result" from "bad shape".
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, LocalizeError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| LocalizeError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let empty = match &value {
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    if empty {
        return Err(LocalizeError::NoMatch);
    }

    serde_json::from_value(value).map_err(|e| LocalizeError::MalformedResponse(e.to_string()))
}

/// Collect names from an OSM `namedetails` object (`"name:ru": "Алматы"`).
pub fn names_from_tags(tags: &Map<String, Value>) -> Result<AltNameSet, LocalizeError> {
    let mut set = AltNameSet::default();

    for (key, value) in tags {
        let Some(locale) = Locale::from_name_tag(key) else {
            continue;
        };
        match value {
            Value::String(name) => insert_name(&mut set, locale, name),
            Value::Null => {}
            other => {
                return Err(LocalizeError::MalformedResponse(format!(
                    "{key} should be a string, got {}",
                    type_name(other)
                )));
            }
        }
    }

    set.international_name = match tags.get("int_name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(other) => {
            return Err(LocalizeError::MalformedResponse(format!(
                "int_name should be a string, got {}",
                type_name(other)
            )));
        }
    };

    require_names(set)
}

/// Collect names from an Algolia `locale_names` object (`"ru": ["Алматы"]`).
///
/// The first entry of each list is the preferred name.
pub fn names_from_locale_lists(lists: &Map<String, Value>) -> Result<AltNameSet, LocalizeError> {
    let mut set = AltNameSet::default();

    for (key, value) in lists {
        let Some(locale) = Locale::from_code(key) else {
            continue;
        };
        let Value::Array(names) = value else {
            return Err(LocalizeError::MalformedResponse(format!(
                "locale_names.{key} should be an array, got {}",
                type_name(value)
            )));
        };
        if let Some(bad) = names.iter().find(|n| !n.is_string()) {
            return Err(LocalizeError::MalformedResponse(format!(
                "locale_names.{key} should hold strings, got {}",
                type_name(bad)
            )));
        }
        if let Some(Value::String(first)) = names.first() {
            insert_name(&mut set, locale, first);
        }
    }

    require_names(set)
}

fn insert_name(set: &mut AltNameSet, locale: Locale, name: &str) {
    let name = name.trim();
    if !name.is_empty() {
        set.names.insert(locale, name.to_string());
    }
}

fn require_names(set: AltNameSet) -> Result<AltNameSet, LocalizeError> {
    if set.is_empty() {
        Err(LocalizeError::NoLocalizedName)
    } else {
        Ok(set)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
