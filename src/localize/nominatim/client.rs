//! Nominatim provider
//!
//! Free OpenStreetMap search. One public endpoint, no credentials, and a
//! strict usage policy: identify yourself and stay under one request per
//! second. See: https://operations.osmfoundation.org/policies/nominatim/

use reqwest::Url;

use super::adapter;
use crate::localize::domain::{AltNameSet, LocalizeError};
use crate::localize::http::{APP_USER_AGENT, ProviderRequest};
use crate::localize::traits::{Provider, ProviderConfig};
use crate::model::Entity;

pub const DEFAULT_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim search backend.
pub struct NominatimProvider {
    config: ProviderConfig,
    base_url: Url,
}

impl NominatimProvider {
    pub fn new(config: ProviderConfig, base_url: Url) -> Self {
        Self { config, base_url }
    }
}

impl Provider for NominatimProvider {
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
            .append_pair("format", "json")
            .append_pair("namedetails", "1")
            .append_pair(entity.kind().as_str(), name);

        Ok(ProviderRequest::get(url)
            .header("Accept", "application/json")
            .header("User-Agent", APP_USER_AGENT))
    }

    fn extract(&self, _entity: &dyn Entity, body: &str) -> Result<AltNameSet, LocalizeError> {
        adapter::to_alt_names(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, Country, EntityKind};
    use std::time::Duration;

    fn provider() -> NominatimProvider {
        NominatimProvider::new(
            ProviderConfig {
                name: "nominatim".to_string(),
                failure_log: "nominatim.failed".into(),
                delay: Duration::from_millis(1500),
                timeout: Duration::from_secs(30),
            },
            Url::parse(DEFAULT_URL).unwrap(),
        )
    }

    #[test]
    fn test_country_request() {
        let country = Country {
            id: 1,
            name: Some("Казахстан".to_string()),
            name_en: Some("Kazakhstan".to_string()),
        };
        let request = provider().build_request(&country).unwrap();

        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(request.host(), Some("nominatim.openstreetmap.org"));
        let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("format".to_string(), "json".to_string()),
                ("namedetails".to_string(), "1".to_string()),
                ("country".to_string(), "Казахстан".to_string()),
            ]
        );
        assert_eq!(request.header_value("Accept"), Some("application/json"));
        assert_eq!(request.header_value("User-Agent"), Some(APP_USER_AGENT));
    }

    #[test]
    fn test_city_request_uses_national_name() {
        let city = City {
            id: 9,
            name: None,
            name_national: Some("Шымкент".to_string()),
        };
        let request = provider().build_request(&city).unwrap();
        assert!(
            request
                .url
                .query_pairs()
                .any(|(k, v)| k == "city" && v == "Шымкент")
        );
    }

    #[test]
    fn test_request_without_names() {
        let city = City {
            id: 5,
            name: None,
            name_national: None,
        };
        assert_eq!(
            provider().build_request(&city).unwrap_err(),
            LocalizeError::Precondition {
                kind: EntityKind::City,
                id: 5
            }
        );
    }

    #[test]
    fn test_no_failover() {
        assert!(provider().failover().is_none());
        assert_eq!(provider().failure_log_path().to_str(), Some("nominatim.failed"));
    }
}
