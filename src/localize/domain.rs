//! Internal domain models for localized names.
//!
//! These types are OUR types - they don't change when a provider API changes.
//! Every provider response is converted into an [`AltNameSet`] by its adapter.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::EntityKind;

/// Locales we keep. Anything else a provider returns is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Locale {
    Ru,
    En,
    Kk,
    Uk,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::Ru, Locale::En, Locale::Kk, Locale::Uk];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Kk => "kk",
            Self::Uk => "uk",
        }
    }

    /// Match a bare locale code (`"ru"`), as used by Algolia.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Match an OSM name tag (`"name:ru"`), as used by Nominatim and MapQuest.
    pub fn from_name_tag(tag: &str) -> Option<Self> {
        tag.strip_prefix("name:").and_then(Self::from_code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Localized names for one entity, as extracted from one provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AltNameSet {
    pub names: BTreeMap<Locale, String>,
    /// International / canonical name, when the provider (or entity) has one
    pub international_name: Option<String>,
}

impl AltNameSet {
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, locale: Locale) -> Option<&str> {
        self.names.get(&locale).map(String::as_str)
    }

    /// Expand into one record per present locale, in locale order.
    pub fn into_records(self, entity_id: i64, entity_kind: EntityKind) -> Vec<TranslationRecord> {
        let international_name = self.international_name;
        self.names
            .into_iter()
            .map(|(locale, name)| TranslationRecord {
                entity_id,
                entity_kind,
                locale,
                name,
                international_name: international_name.clone(),
            })
            .collect()
    }
}

/// A row in `cities_translations` / `countries_translations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub entity_id: i64,
    pub entity_kind: EntityKind,
    pub locale: Locale,
    pub name: String,
    pub international_name: Option<String>,
}

/// Steps of one loop iteration, in order. Every entity-scoped error belongs
/// to exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    BuildRequest,
    Send,
    Extract,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fetch => "fetch",
            Self::BuildRequest => "request",
            Self::Send => "send",
            Self::Extract => "extract",
            Self::Persist => "persist",
        };
        f.write_str(s)
    }
}

/// Errors scoped to a single entity. None of them abort a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalizeError {
    #[error("Both names of {kind} {id} are NULL")]
    Precondition { kind: EntityKind, id: i64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned no match")]
    NoMatch,

    #[error("Response contains no supported locale")]
    NoLocalizedName,

    #[error("Failed to persist translations: {0}")]
    Persistence(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("{kind} {id} could not be read: {reason}")]
    Undecodable {
        kind: EntityKind,
        id: i64,
        reason: String,
    },
}

impl LocalizeError {
    /// The step that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::NotFound { .. } | Self::Undecodable { .. } => Stage::Fetch,
            Self::Precondition { .. } => Stage::BuildRequest,
            Self::Transport(_) | Self::HttpStatus { .. } => Stage::Send,
            Self::MalformedResponse(_) | Self::NoMatch | Self::NoLocalizedName => Stage::Extract,
            Self::Persistence(_) => Stage::Persist,
        }
    }
}

impl From<sqlx::Error> for LocalizeError {
    fn from(e: sqlx::Error) -> Self {
        Self::Persistence(e.to_string())
    }
}
