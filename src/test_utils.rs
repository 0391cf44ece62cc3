//! Test utilities and fixtures for geo-altnames tests.
//!
//! Provides a throwaway SQLite database carrying the (externally owned)
//! schema, plus helpers to seed entities.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_db, insert_city};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     insert_city(&pool, 7, Some("Almaty"), None).await;
//!     // ... test logic
//! }
//! ```

use sqlx::FromRow;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::model::EntityKind;

/// Schema of the tables the pipeline reads and writes.
///
/// The translations tables carry no unique key, mirroring production.
const SCHEMA: &[&str] = &[
    "CREATE TABLE cities (id INTEGER PRIMARY KEY, name TEXT, name_national TEXT)",
    "CREATE TABLE countries (id INTEGER PRIMARY KEY, name TEXT, name_en TEXT)",
    "CREATE TABLE cities_translations (
        city_id INTEGER NOT NULL,
        locale TEXT NOT NULL,
        name TEXT NOT NULL,
        int_name TEXT
    )",
    "CREATE TABLE countries_translations (
        country_id INTEGER NOT NULL,
        locale TEXT NOT NULL,
        name TEXT NOT NULL,
        int_name TEXT
    )",
];

/// Creates a temporary database with the schema in place.
///
/// # Returns
///
/// A tuple of (connection pool, temp directory handle).
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_url = crate::db::db_url(Some(&dir.path().join("test.db")));

    sqlx::Sqlite::create_database(&db_url)
        .await
        .expect("Failed to create test database");
    let pool = crate::db::connect(&db_url)
        .await
        .expect("Failed to open test database");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to create schema");
    }

    (pool, dir)
}

pub async fn insert_city(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    name_national: Option<&str>,
) {
    sqlx::query("INSERT INTO cities (id, name, name_national) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(name_national)
        .execute(pool)
        .await
        .expect("Failed to insert city");
}

pub async fn insert_country(pool: &SqlitePool, id: i64, name: Option<&str>, name_en: Option<&str>) {
    sqlx::query("INSERT INTO countries (id, name, name_en) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(name_en)
        .execute(pool)
        .await
        .expect("Failed to insert country");
}

/// A stored translation row, as read back.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TranslationRow {
    pub entity_id: i64,
    pub locale: String,
    pub name: String,
    pub int_name: Option<String>,
}

/// All translation rows of one kind, in insertion order.
pub async fn get_translations(
    pool: &SqlitePool,
    kind: EntityKind,
) -> sqlx::Result<Vec<TranslationRow>> {
    let sql = format!(
        "SELECT {} AS entity_id, locale, name, int_name FROM {} ORDER BY rowid",
        kind.translations_fk(),
        kind.translations_table()
    );
    sqlx::query_as(&sql).fetch_all(pool).await
}

/// Number of rows in a table.
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows");
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_schema() {
        let (pool, _dir) = temp_db().await;
        insert_city(&pool, 1, Some("Almaty"), None).await;
        insert_country(&pool, 1, None, Some("Kazakhstan")).await;
        assert_eq!(count_rows(&pool, "cities").await, 1);
        assert_eq!(count_rows(&pool, "countries").await, 1);
        assert_eq!(count_rows(&pool, "cities_translations").await, 0);
    }
}
