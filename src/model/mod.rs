//! Geographic entities read from the relational store.
//!
//! Defines [`City`] and [`Country`] plus the [`Entity`] capability that lets
//! the localization loop treat either one as a named, identified record.
//!
//! # Database Schema
//!
//! The models map to the following (externally managed) tables:
//! - `cities` - `id`, `name`, `name_national`
//! - `countries` - `id`, `name`, `name_en`
//!
//! Translations go to `cities_translations` / `countries_translations`.

use std::fmt;
use std::str::FromStr;

use sqlx::FromRow;

/// Discriminator between the two entity tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    City,
    Country,
}

impl EntityKind {
    /// Name used as the provider query parameter (`city=` / `country=`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Country => "country",
        }
    }

    /// Source table holding the entities.
    pub fn table(&self) -> &'static str {
        match self {
            Self::City => "cities",
            Self::Country => "countries",
        }
    }

    /// Column holding the secondary name in the source table.
    pub fn fallback_column(&self) -> &'static str {
        match self {
            Self::City => "name_national",
            Self::Country => "name_en",
        }
    }

    /// Table receiving translation rows.
    pub fn translations_table(&self) -> &'static str {
        match self {
            Self::City => "cities_translations",
            Self::Country => "countries_translations",
        }
    }

    /// Foreign key column of the translations table.
    pub fn translations_fk(&self) -> &'static str {
        match self {
            Self::City => "city_id",
            Self::Country => "country_id",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "city" | "cities" => Ok(Self::City),
            "country" | "countries" => Ok(Self::Country),
            other => Err(format!("unknown entity kind: {other}")),
        }
    }
}

/// Uniform view over cities and countries.
pub trait Entity: fmt::Debug + Send + Sync {
    /// Primary key, never reassigned.
    fn id(&self) -> i64;

    fn kind(&self) -> EntityKind;

    /// The `name` column.
    fn primary_name(&self) -> Option<&str>;

    /// `name_national` for cities, `name_en` for countries.
    fn fallback_name(&self) -> Option<&str>;

    /// Name sent to a provider: the primary name when present, else the fallback.
    ///
    /// Returns `None` when both are absent; the request cannot be built.
    fn query_name(&self) -> Option<&str> {
        self.primary_name().or_else(|| self.fallback_name())
    }
}

/// A city row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct City {
    pub id: i64,
    pub name: Option<String>,
    pub name_national: Option<String>,
}

/// A country row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Country {
    pub id: i64,
    pub name: Option<String>,
    pub name_en: Option<String>,
}

impl Entity for City {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::City
    }

    fn primary_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn fallback_name(&self) -> Option<&str> {
        self.name_national.as_deref()
    }
}

impl Entity for Country {
    fn id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Country
    }

    fn primary_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn fallback_name(&self) -> Option<&str> {
        self.name_en.as_deref()
    }
}
