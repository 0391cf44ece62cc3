//! Outbound HTTP plumbing shared by all providers.
//!
//! Providers describe a request as a [`ProviderRequest`] value. The value can
//! be cloned and re-targeted at another host, which is what the failover
//! chain needs. [`ReqwestTransport`] turns it into a real reqwest call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};

use super::domain::LocalizeError;
use super::traits::{HttpTransport, Sleeper};

/// User agent sent to the commercial APIs. Their key checks were set up
/// against this exact value.
pub const BROWSER_USER_AGENT: &str = "MSIE/15.0";

/// User agent identifying this tool, required by the Nominatim usage policy.
pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A fully built, transport-agnostic request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl ProviderRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with a JSON body; sets `Content-Type`.
    pub fn post_json(url: Url, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Copy of this request pointed at `host`. Scheme, path, query, headers
    /// and body are left as they are.
    pub fn with_host(&self, host: &str) -> Result<Self, LocalizeError> {
        let mut request = self.clone();
        request
            .url
            .set_host(Some(host))
            .map_err(|e| LocalizeError::Transport(format!("invalid host {host}: {e}")))?;
        Ok(request)
    }
}

#[cfg(test)]
impl ProviderRequest {
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and fully read body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// [`HttpTransport`] backed by a reqwest client.
///
/// The body is read to completion inside `send`, so the connection is handed
/// back before the caller sees the response.
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .timeout(timeout)
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<HttpResponse, LocalizeError> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(ref body) = request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LocalizeError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LocalizeError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

/// Real wall-clock sleeper.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
