//! Localization pipeline: fetch entities, ask a geocoding backend for their
//! names in the supported locales, store the translations.
//!
//! # Architecture
//!
//! - [`traits`]: the [`traits::Provider`], [`traits::HttpTransport`] and
//!   [`traits::Sleeper`] seams
//! - [`service`]: the sequential loop ([`Localizer`]) and failure log replay
//! - [`nominatim`], [`algolia`], [`mapquest`]: one module per backend
//! - [`failover`]: ordered host fallback for backends with backup hosts
//! - [`extract`]: shared response decoding and the locale allow-list
//! - [`failure_log`]: append-only file of failed entity IDs
//!
//! # Example
//!
//! ```ignore
//! use geo_altnames::localize::{build_provider, Localizer, ProviderKind, ReqwestTransport};
//!
//! let provider = build_provider(ProviderKind::Algolia, &config)?;
//! let transport = ReqwestTransport::new(provider.config().timeout)?;
//! let summary = Localizer::new(provider, Box::new(transport))
//!     .localize_cities(&pool)
//!     .await?;
//! ```

pub mod algolia;
pub mod domain;
pub mod extract;
pub mod failover;
pub mod failure_log;
pub mod http;
pub mod mapquest;
pub mod nominatim;
pub mod registry;
pub mod service;
pub mod traits;

pub use domain::LocalizeError;
pub use http::ReqwestTransport;
pub use registry::{ProviderKind, build_provider};
pub use service::{Localizer, RunOptions};
