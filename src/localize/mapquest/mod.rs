//! MapQuest Open Nominatim provider
//!
//! Commercial, key-authenticated hosting of the Nominatim search API. The
//! response shape is Nominatim's, so extraction reuses that adapter.
//! API docs: https://developer.mapquest.com/documentation/open/nominatim-search/

use reqwest::Url;

use crate::localize::domain::{AltNameSet, LocalizeError};
use crate::localize::http::{BROWSER_USER_AGENT, ProviderRequest};
use crate::localize::nominatim::adapter;
use crate::localize::traits::{Provider, ProviderConfig};
use crate::model::Entity;

pub const DEFAULT_URL: &str = "http://open.mapquestapi.com/nominatim/v1/search.php";

/// MapQuest address search backend.
pub struct MapquestProvider {
    config: ProviderConfig,
    base_url: Url,
    api_key: String,
}

impl MapquestProvider {
    pub fn new(config: ProviderConfig, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            config,
            base_url,
            api_key: api_key.into(),
        }
    }
}

impl Provider for MapquestProvider {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn build_request(&self, entity: &dyn Entity) -> Result<ProviderRequest, LocalizeError> {
        let name = entity.query_name().ok_or(LocalizeError::Precondition {
            kind: entity.kind(),
            id: entity.id(),
        })?;

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("format", "json")
            .append_pair(entity.kind().as_str(), name)
            .append_pair("addressdetails", "1")
            .append_pair("namedetails", "1");

        Ok(ProviderRequest::get(url)
            .header("Accept", "application/json")
            .header("User-Agent", BROWSER_USER_AGENT))
    }

    fn extract(&self, _entity: &dyn Entity, body: &str) -> Result<AltNameSet, LocalizeError> {
        adapter::to_alt_names(body)
    }
}
