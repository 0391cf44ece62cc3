//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! and `main` use `anyhow` for convenient propagation.
//!
//! # Design
//!
//! - [`Error`]: run-level error; anything surfacing here aborts the run
//! - [`LocalizeError`](crate::localize::LocalizeError): entity-level error; the loop records it and moves on
//! - [`ConfigError`](crate::config::ConfigError): startup configuration problems
//!
//! # Example
//!
//! ```ignore
//! use geo_altnames::error::{Result, ResultExt};
//!
//! fn open_log(path: &Path) -> Result<FailureLog> {
//!     FailureLog::open(path).with_context(format!("opening {}", path.display()))
//! }
//! ```

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error (failure log)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error (entity source unreachable)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Database(e).context(ctx))
    }
}
