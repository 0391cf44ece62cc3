//! Host failover for providers with redundant endpoints.
//!
//! Hosts are tried strictly in the order given. Only transport failures move
//! on to the next host; a host that answers with an HTTP error status still
//! wins and its response is returned as is.

use super::domain::LocalizeError;
use super::http::{HttpResponse, ProviderRequest};
use super::traits::HttpTransport;

/// Ordered host candidates: primary first, then backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverChain {
    hosts: Vec<String>,
}

impl FailoverChain {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(Into::into).collect(),
        }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Send `template` to each host in turn until one answers.
    ///
    /// Returns the last error when every host fails.
    pub async fn execute(
        &self,
        template: &ProviderRequest,
        transport: &dyn HttpTransport,
    ) -> Result<HttpResponse, LocalizeError> {
        let mut last_error = None;

        for (attempt, host) in self.hosts.iter().enumerate() {
            let request = match template.with_host(host) {
                Ok(request) => request,
                Err(e) => {
                    tracing::warn!("Skipping host {}: {}", host, e);
                    last_error = Some(e);
                    continue;
                }
            };

            tracing::debug!("Attempt {} via {}", attempt + 1, host);
            match transport.send(&request).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!("Host {} answered after {} failure(s)", host, attempt);
                    }
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!("Host {} unreachable: {}", host, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LocalizeError::Transport("no hosts configured".to_string())))
    }
}
