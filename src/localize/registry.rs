//! Provider selection by name.

use std::fmt;

use clap::ValueEnum;

use super::algolia::AlgoliaProvider;
use super::mapquest::MapquestProvider;
use super::nominatim::NominatimProvider;
use super::traits::Provider;
use crate::config::{Config, ConfigError};

/// The geocoding backends that can drive a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Nominatim,
    Algolia,
    Mapquest,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
            Self::Algolia => "algolia",
            Self::Mapquest => "mapquest",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the selected provider from configuration.
///
/// # Errors
///
/// [`ConfigError::MissingCredential`] when the backend needs keys that are
/// not configured, [`ConfigError::InvalidUrl`] for a bad endpoint.
pub fn build_provider(kind: ProviderKind, config: &Config) -> Result<Box<dyn Provider>, ConfigError> {
    let provider: Box<dyn Provider> = match kind {
        ProviderKind::Nominatim => Box::new(NominatimProvider::new(
            config.nominatim.provider_config(),
            config.nominatim.endpoint()?,
        )),
        ProviderKind::Algolia => Box::new(AlgoliaProvider::new(
            config.algolia.provider_config(),
            config.algolia.endpoint()?,
            config.algolia.credentials()?,
            &config.algolia.backup_hosts,
        )),
        ProviderKind::Mapquest => Box::new(MapquestProvider::new(
            config.mapquest.provider_config(),
            config.mapquest.endpoint()?,
            config.mapquest.api_key()?,
        )),
    };
    Ok(provider)
}
