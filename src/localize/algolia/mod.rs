//! Algolia Places integration
//!
//! Commercial place search with locale-keyed name lists and redundant hosts.
//! API docs: https://community.algolia.com/places/rest.html

mod adapter;
mod client;
pub mod dto;

pub use client::{AlgoliaCredentials, AlgoliaProvider, BACKUP_HOSTS, DEFAULT_URL};
