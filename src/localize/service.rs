//! Localization service - the enrichment loop
//!
//! For each entity, strictly one after another:
//! 1. Fetch the next entity from the store (ID order)
//! 2. Build the provider request
//! 3. Send it, through the provider's failover chain if it has one
//! 4. Extract localized names from the response
//! 5. Persist one translation row per locale
//!
//! Any failing step records the entity ID in the provider's failure log and
//! the loop carries on with the next entity. The fixed provider delay is
//! spent after every entity whose request went out.

use std::fmt;
use std::path::Path;

use sqlx::sqlite::SqlitePool;

use super::domain::LocalizeError;
use super::failure_log::{self, FailureLog};
use super::http::{HttpResponse, ProviderRequest, TokioSleeper};
use super::traits::{HttpTransport, Provider, Sleeper};
use crate::db::{self, EntityCursor, EntityRow};
use crate::error::{Error, Result, ResultExt};
use crate::model::{City, Country, Entity, EntityKind};

/// Knobs for a run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Skip entities that already have translation rows
    pub skip_translated: bool,
    /// Rows per entity-source round trip
    pub page_size: i64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            skip_translated: false,
            page_size: db::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Entities pulled from the source
    pub processed: usize,
    /// Entities whose translations were stored
    pub translated: usize,
    /// Entities written to the failure log
    pub failed: usize,
    /// Entities skipped because they already had translations
    pub skipped: usize,
    /// Translation rows inserted
    pub rows_inserted: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} translated ({} rows), {} failed, {} skipped",
            self.processed, self.translated, self.rows_inserted, self.failed, self.skipped
        )
    }
}

/// Drives one provider over the entity store.
pub struct Localizer {
    provider: Box<dyn Provider>,
    transport: Box<dyn HttpTransport>,
    sleeper: Box<dyn Sleeper>,
    options: RunOptions,
}

impl Localizer {
    /// Create a localizer that sleeps on the real clock.
    pub fn new(provider: Box<dyn Provider>, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            provider,
            transport,
            sleeper: Box::new(TokioSleeper),
            options: RunOptions::default(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn failure_log_path(&self) -> &Path {
        self.provider.failure_log_path()
    }

    /// Localize every country in the store.
    pub async fn localize_countries(&self, pool: &SqlitePool) -> Result<RunSummary> {
        self.localize_all::<Country>(pool).await
    }

    /// Localize every city in the store.
    pub async fn localize_cities(&self, pool: &SqlitePool) -> Result<RunSummary> {
        self.localize_all::<City>(pool).await
    }

    /// Run dispatcher for a kind chosen at runtime.
    pub async fn localize(&self, pool: &SqlitePool, kind: EntityKind) -> Result<RunSummary> {
        match kind {
            EntityKind::City => self.localize_cities(pool).await,
            EntityKind::Country => self.localize_countries(pool).await,
        }
    }

    async fn localize_all<E: EntityRow>(&self, pool: &SqlitePool) -> Result<RunSummary> {
        let mut log = self.open_failure_log()?;
        let mut cursor = EntityCursor::<E>::new(self.options.page_size);
        let mut summary = RunSummary::default();

        tracing::info!(
            "{}: localizing {} entities from {}",
            self.provider.name(),
            E::KIND,
            E::KIND.table()
        );

        loop {
            let (id, row) = match cursor.next(pool).await {
                Ok(Some(next)) => next,
                Ok(None) => break,
                // the source was never readable
                Err(e) if summary.processed == 0 => {
                    return Err(Error::Database(e).context(format!("reading {}", E::KIND.table())));
                }
                Err(e) => {
                    tracing::error!(
                        "{}: reading {} failed after {} entities, stopping: {}",
                        self.provider.name(),
                        E::KIND.table(),
                        summary.processed,
                        e
                    );
                    eprintln!("✗ Stopped early, {} unreadable: {}", E::KIND.table(), e);
                    break;
                }
            };

            match row {
                Ok(entity) => self.process(pool, &entity, &mut log, &mut summary).await,
                Err(e) => {
                    summary.processed += 1;
                    self.fail(id, &e, &mut log, &mut summary);
                }
            }
        }

        tracing::info!("{}: {}", self.provider.name(), summary);
        Ok(summary)
    }

    /// Re-run the entities listed in a failure log.
    ///
    /// The whole log is read before processing starts, so `log_path` may be
    /// this provider's own failure log.
    pub async fn replay(
        &self,
        pool: &SqlitePool,
        kind: EntityKind,
        log_path: &Path,
    ) -> Result<RunSummary> {
        let ids = failure_log::read_ids(log_path)
            .with_context(format!("reading failure log {}", log_path.display()))?;
        let mut log = self.open_failure_log()?;
        let mut summary = RunSummary::default();

        tracing::info!(
            "{}: replaying {} {} id(s) from {}",
            self.provider.name(),
            ids.len(),
            kind,
            log_path.display()
        );

        for id in ids {
            match db::fetch_entity(pool, kind, id).await {
                Ok(Some(entity)) => {
                    self.process(pool, entity.as_ref(), &mut log, &mut summary)
                        .await;
                }
                Ok(None) => {
                    summary.processed += 1;
                    self.fail(id, &LocalizeError::NotFound { kind, id }, &mut log, &mut summary);
                }
                Err(e) => {
                    summary.processed += 1;
                    self.fail(id, &e, &mut log, &mut summary);
                }
            }
        }

        tracing::info!("{}: replay done, {}", self.provider.name(), summary);
        Ok(summary)
    }

    /// Fetch → request → response → extract → persist for one entity.
    ///
    /// Sleeps for the provider delay once a request has gone out, whatever
    /// the outcome.
    ///
    /// # Returns
    ///
    /// The number of translation rows inserted.
    pub async fn localize_entity(
        &self,
        pool: &SqlitePool,
        entity: &dyn Entity,
    ) -> std::result::Result<u64, LocalizeError> {
        let request = self.provider.build_request(entity)?;
        let result = self.request_and_persist(pool, entity, &request).await;
        self.sleeper.sleep(self.provider.config().delay).await;
        result
    }

    async fn request_and_persist(
        &self,
        pool: &SqlitePool,
        entity: &dyn Entity,
        request: &ProviderRequest,
    ) -> std::result::Result<u64, LocalizeError> {
        let response = self.send(request).await?;
        if !response.is_success() {
            return Err(LocalizeError::HttpStatus {
                status: response.status,
                body: response.body.chars().take(200).collect(),
            });
        }

        let names = self.provider.extract(entity, &response.body)?;
        let records = names.into_records(entity.id(), entity.kind());
        let inserted = db::insert_translations(pool, &records).await?;

        for record in &records {
            tracing::info!(
                "Insert OK: {} {} locale={} name={} int_name={:?}",
                record.entity_kind,
                record.entity_id,
                record.locale,
                record.name,
                record.international_name
            );
        }
        Ok(inserted)
    }

    async fn send(&self, request: &ProviderRequest) -> std::result::Result<HttpResponse, LocalizeError> {
        match self.provider.failover() {
            Some(chain) => chain.execute(request, self.transport.as_ref()).await,
            None => self.transport.send(request).await,
        }
    }

    async fn process(
        &self,
        pool: &SqlitePool,
        entity: &dyn Entity,
        log: &mut FailureLog,
        summary: &mut RunSummary,
    ) {
        summary.processed += 1;

        if self.options.skip_translated {
            match db::has_translations(pool, entity.kind(), entity.id()).await {
                Ok(true) => {
                    tracing::debug!("{} {} already translated", entity.kind(), entity.id());
                    summary.skipped += 1;
                    return;
                }
                Ok(false) => {}
                Err(e) => {
                    self.fail(entity.id(), &LocalizeError::from(e), log, summary);
                    return;
                }
            }
        }

        match self.localize_entity(pool, entity).await {
            Ok(rows) => {
                summary.translated += 1;
                summary.rows_inserted += rows;
                println!(
                    "{} >>> {} {} {}: {} translation(s)",
                    summary.processed,
                    entity.kind(),
                    entity.id(),
                    entity.query_name().unwrap_or("?"),
                    rows
                );
            }
            Err(e) => self.fail(entity.id(), &e, log, summary),
        }
    }

    fn fail(&self, id: i64, error: &LocalizeError, log: &mut FailureLog, summary: &mut RunSummary) {
        summary.failed += 1;
        log.record(id);
        tracing::warn!(
            "{}: id {} failed at {} stage: {}",
            self.provider.name(),
            id,
            error.stage(),
            error
        );
        eprintln!("✗ {} (logged id {} to {})", error, id, log.path().display());
    }

    fn open_failure_log(&self) -> Result<FailureLog> {
        let path = self.provider.failure_log_path();
        FailureLog::open(path).with_context(format!("opening failure log {}", path.display()))
    }
}
