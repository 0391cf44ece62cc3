//! Database access for entities and their translations.
//!
//! Uses SQLx with SQLite. The schema is owned elsewhere; this module only
//! reads `cities` / `countries` and inserts into the translations tables.
//! Provides async operations for:
//! - Paging through entities in ID order ([`EntityCursor`]), decoding each
//!   row on its own
//! - Looking up a single entity by ID (failure log replay)
//! - Inserting translation rows, one transaction per entity
//!
//! # Example
//!
//! ```ignore
//! use geo_altnames::db::{connect, EntityCursor};
//!
//! let pool = connect("sqlite:geo.db").await?;
//! let mut cursor = EntityCursor::<City>::new(DEFAULT_PAGE_SIZE);
//! while let Some((id, city)) = cursor.next(&pool).await? { /* ... */ }
//! ```

use std::collections::VecDeque;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row};

use crate::localize::domain::{LocalizeError, TranslationRecord};
use crate::model::{City, Country, Entity, EntityKind};

/// Default database URL.
pub const DEFAULT_DB_URL: &str = "sqlite:geo.db";

/// Rows fetched per cursor round trip.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Build a SQLite database URL from an optional path.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => DEFAULT_DB_URL.to_string(),
    }
}

/// Open a connection pool on an existing database.
///
/// Does not create the file and runs no migrations.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database can't be opened.
pub async fn connect(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(db_url)?;
    SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
}

/// An entity type that can be read straight from its table.
pub trait EntityRow: Entity + for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    const KIND: EntityKind;
}

impl EntityRow for City {
    const KIND: EntityKind = EntityKind::City;
}

impl EntityRow for Country {
    const KIND: EntityKind = EntityKind::Country;
}

fn select_columns(kind: EntityKind) -> String {
    format!(
        "SELECT id, name, {} FROM {}",
        kind.fallback_column(),
        kind.table()
    )
}

/// Decode one entity row. A failure only concerns that row.
fn decode_row<E: EntityRow>(row: &SqliteRow, id: i64) -> Result<E, LocalizeError> {
    E::from_row(row).map_err(|e| LocalizeError::Undecodable {
        kind: E::KIND,
        id,
        reason: e.to_string(),
    })
}

/// Forward-only cursor over all entities of one kind, ascending by ID.
///
/// Reads in pages keyed on the last seen ID, so no statement stays open
/// between iterations. Rows are decoded one by one: a row that does not
/// decode comes back as an error next to its ID and the cursor moves on.
#[derive(Debug)]
pub struct EntityCursor<E> {
    last_id: Option<i64>,
    page: VecDeque<(i64, Result<E, LocalizeError>)>,
    page_size: i64,
    exhausted: bool,
}

impl<E: EntityRow> EntityCursor<E> {
    pub fn new(page_size: i64) -> Self {
        Self {
            last_id: None,
            page: VecDeque::new(),
            page_size: page_size.max(1),
            exhausted: false,
        }
    }

    /// Next row as `(id, entity or decode error)`, or `None` once the table
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// Only when the page query itself fails.
    pub async fn next(
        &mut self,
        pool: &SqlitePool,
    ) -> sqlx::Result<Option<(i64, Result<E, LocalizeError>)>> {
        if self.page.is_empty() && !self.exhausted {
            self.fill(pool).await?;
        }
        Ok(self.page.pop_front())
    }

    async fn fill(&mut self, pool: &SqlitePool) -> sqlx::Result<()> {
        let select = select_columns(E::KIND);
        let rows: Vec<SqliteRow> = match self.last_id {
            Some(last_id) => {
                sqlx::query(&format!("{select} WHERE id > ? ORDER BY id LIMIT ?"))
                    .bind(last_id)
                    .bind(self.page_size)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                sqlx::query(&format!("{select} ORDER BY id LIMIT ?"))
                    .bind(self.page_size)
                    .fetch_all(pool)
                    .await?
            }
        };

        if (rows.len() as i64) < self.page_size {
            self.exhausted = true;
        }
        for row in &rows {
            let id: i64 = row.try_get("id")?;
            self.last_id = Some(id);
            self.page.push_back((id, decode_row::<E>(row, id)));
        }
        Ok(())
    }
}

/// Look up one entity by ID.
///
/// A failing lookup or an undecodable row is an error for this ID only.
pub async fn fetch_entity(
    pool: &SqlitePool,
    kind: EntityKind,
    id: i64,
) -> Result<Option<Box<dyn Entity>>, LocalizeError> {
    let sql = format!("{} WHERE id = ?", select_columns(kind));
    let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(pool).await? else {
        return Ok(None);
    };

    let entity: Box<dyn Entity> = match kind {
        EntityKind::City => Box::new(decode_row::<City>(&row, id)?),
        EntityKind::Country => Box::new(decode_row::<Country>(&row, id)?),
    };
    Ok(Some(entity))
}

/// Insert translation rows.
///
/// All rows go in one transaction: either every locale of the entity is
/// stored or none is. Plain INSERT, so running twice stores duplicates.
///
/// # Returns
///
/// The number of rows inserted.
pub async fn insert_translations(
    pool: &SqlitePool,
    records: &[TranslationRecord],
) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for record in records {
        let kind = record.entity_kind;
        let sql = format!(
            "INSERT INTO {}({}, locale, name, int_name) VALUES (?, ?, ?, ?)",
            kind.translations_table(),
            kind.translations_fk()
        );
        let result = sqlx::query(&sql)
            .bind(record.entity_id)
            .bind(record.locale.code())
            .bind(&record.name)
            .bind(record.international_name.as_deref())
            .execute(&mut *tx)
            .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Whether an entity already has at least one translation row.
pub async fn has_translations(pool: &SqlitePool, kind: EntityKind, id: i64) -> sqlx::Result<bool> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?)",
        kind.translations_table(),
        kind.translations_fk()
    );
    let (exists,): (i64,) = sqlx::query_as(&sql).bind(id).fetch_one(pool).await?;
    Ok(exists != 0)
}
