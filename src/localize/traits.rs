//! Trait definitions at the seams of the localization loop.
//!
//! - [`Provider`]: what a geocoding backend must supply (request shape,
//!   response shape, throttle, failure log)
//! - [`HttpTransport`]: how a request reaches the network
//! - [`Sleeper`]: how the fixed inter-request delay is spent
//!
//! Production code uses the real implementations; tests substitute the
//! mocks at the bottom of this file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use super::domain::{AltNameSet, LocalizeError};
use super::failover::FailoverChain;
use super::http::{HttpResponse, ProviderRequest};
use crate::model::Entity;

/// Static per-provider settings, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Display name, also used in log lines
    pub name: String,
    /// Append-only file receiving IDs of failed entities
    pub failure_log: PathBuf,
    /// Pause after every dispatched request
    pub delay: Duration,
    /// Outbound client timeout
    pub timeout: Duration,
}

/// A geocoding backend.
///
/// The loop in [`super::service::Localizer`] only talks to this trait, so
/// backends can be swapped (and tested) independently.
pub trait Provider: Send + Sync {
    fn config(&self) -> &ProviderConfig;

    /// Build the backend-specific request for one entity.
    ///
    /// Fails with [`LocalizeError::Precondition`] when the entity has no name.
    fn build_request(&self, entity: &dyn Entity) -> Result<ProviderRequest, LocalizeError>;

    /// Turn a raw response body into localized names.
    fn extract(&self, entity: &dyn Entity, body: &str) -> Result<AltNameSet, LocalizeError>;

    /// Redundant hosts to try in order, for backends that have them.
    fn failover(&self) -> Option<&FailoverChain> {
        None
    }

    fn name(&self) -> &str {
        &self.config().name
    }

    fn failure_log_path(&self) -> &Path {
        &self.config().failure_log
    }
}

/// Sends a request and returns the status plus fully read body.
///
/// Only connection-level problems are errors; HTTP error statuses come back
/// as an `Ok` response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<HttpResponse, LocalizeError>;
}

/// Spends the fixed delay between requests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
