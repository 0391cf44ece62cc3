//! Algolia Places provider
//!
//! Commercial place search. Requests are signed with an application id and
//! API key, and the service publishes backup hosts for when the primary DSN
//! host is unreachable.

use reqwest::Url;

use super::{adapter, dto};
use crate::localize::domain::{AltNameSet, LocalizeError};
use crate::localize::failover::FailoverChain;
use crate::localize::http::{BROWSER_USER_AGENT, ProviderRequest};
use crate::localize::traits::{Provider, ProviderConfig};
use crate::model::Entity;

pub const DEFAULT_URL: &str = "https://places-dsn.algolia.net/1/places/query";

/// Backup hosts, tried in this order after the primary.
pub const BACKUP_HOSTS: [&str; 3] = [
    "places-1.algolianet.com",
    "places-2.algolianet.com",
    "places-3.algolianet.com",
];

/// Application credentials sent with every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoliaCredentials {
    pub app_id: String,
    pub api_key: String,
}

/// Algolia Places backend.
pub struct AlgoliaProvider {
    config: ProviderConfig,
    base_url: Url,
    credentials: AlgoliaCredentials,
    failover: FailoverChain,
}

impl AlgoliaProvider {
    /// Create a provider; the host of `base_url` heads the failover chain,
    /// followed by `backup_hosts`.
    pub fn new(
        config: ProviderConfig,
        base_url: Url,
        credentials: AlgoliaCredentials,
        backup_hosts: &[String],
    ) -> Self {
        let failover = FailoverChain::new(
            base_url
                .host_str()
                .map(str::to_string)
                .into_iter()
                .chain(backup_hosts.iter().cloned()),
        );
        Self {
            config,
            base_url,
            credentials,
            failover,
        }
    }
}

impl Provider for AlgoliaProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn build_request(&self, entity: &dyn Entity) -> Result<ProviderRequest, LocalizeError> {
        let name = entity.query_name().ok_or(LocalizeError::Precondition {
            kind: entity.kind(),
            id: entity.id(),
        })?;

        let body = serde_json::to_string(&dto::QueryRequest {
            kind: entity.kind().as_str(),
            query: name,
        })
        .map_err(|e| LocalizeError::MalformedResponse(e.to_string()))?;

        Ok(ProviderRequest::post_json(self.base_url.clone(), body)
            .header("Accept", "application/json")
            .header("User-Agent", BROWSER_USER_AGENT)
            .header("X-Algolia-Application-Id", self.credentials.app_id.clone())
            .header("X-Algolia-API-Key", self.credentials.api_key.clone()))
    }

    fn extract(&self, entity: &dyn Entity, body: &str) -> Result<AltNameSet, LocalizeError> {
        adapter::to_alt_names(body, entity.fallback_name())
    }

    fn failover(&self) -> Option<&FailoverChain> {
        Some(&self.failover)
    }
}
