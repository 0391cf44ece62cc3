//! Nominatim (OpenStreetMap) integration
//!
//! Free geocoding search; localized names come from the `namedetails` tags.
//! API docs: https://nominatim.org/release-docs/latest/api/Search/

pub mod adapter;
mod client;
pub mod dto;

pub use client::{DEFAULT_URL, NominatimProvider};
