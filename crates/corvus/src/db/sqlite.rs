//! Sqlite — pool construction and the SQLite flavor of the row helpers.

use std::path::Path;

use serde_json::Value;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::error::Result;
use super::model::{Criterion, PrimaryKey};
use super::sql::{self, Placeholder};

/// Open or create a SQLite database at the given path.
pub async fn sqlite_pool(path: impl AsRef<Path>) -> Result<SqlitePool> {
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let url = format!("sqlite:{}?mode=rwc", path.display());
    tracing::debug!(%url, "Connecting to SQLite");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    Ok(pool)
}

/// True iff a row matching the criterion exists.
pub async fn row_exists(pool: &SqlitePool, table: &str, criterion: &Criterion) -> Result<bool> {
    let stmt = sql::exists_sql(table, &criterion.column, Placeholder::Question);
    let row = bind_value(sqlx::query(&stmt), &criterion.value)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>(0))
}

/// Emulated upsert, SQLite flavor.  See [`crate::db::pg::upsert`].
pub async fn upsert(
    pool: &SqlitePool,
    table: &str,
    pkey: &PrimaryKey,
    columns: &[(String, Value)],
) -> Result<Value> {
    let mut tx = pool.begin().await?;

    let stmt = sql::exists_sql(table, &pkey.column, Placeholder::Question);
    let row = bind_value(sqlx::query(&stmt), &pkey.value)
        .fetch_one(&mut *tx)
        .await?;
    let exists = row.get::<bool, _>(0);

    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();

    let returned = if exists {
        tracing::debug!(table, pk = %pkey.column, "Entry discovered, running UPDATE");
        if columns.is_empty() {
            pkey.value.clone()
        } else {
            let stmt = sql::update_sql(table, &pkey.column, &names, Placeholder::Question);
            let mut query = sqlx::query(&stmt);
            for (_, value) in columns {
                query = bind_value(query, value);
            }
            query = bind_value(query, &pkey.value);
            let row = query.fetch_one(&mut *tx).await?;
            pk_from_row(&row).unwrap_or_else(|| pkey.value.clone())
        }
    } else {
        tracing::debug!(table, pk = %pkey.column, "Entry not found, running INSERT");
        let stmt = sql::insert_sql(table, &pkey.column, &names, Placeholder::Question);
        let mut query = bind_value(sqlx::query(&stmt), &pkey.value);
        for (_, value) in columns {
            query = bind_value(query, value);
        }
        let row = query.fetch_one(&mut *tx).await?;
        pk_from_row(&row).unwrap_or_else(|| pkey.value.clone())
    };

    tx.commit().await?;

    Ok(returned)
}

/// Bind a JSON value with the closest SQLite type.
fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
    value: &Value,
) -> sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else {
                query.bind(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => query.bind(s.clone()),
        other => query.bind(other.to_string()),
    }
}

/// Decode the RETURNING column back into a JSON value.
fn pk_from_row(row: &SqliteRow) -> Option<Value> {
    if let Ok(i) = row.try_get::<i64, _>(0) {
        return Some(Value::from(i));
    }
    if let Ok(s) = row.try_get::<String, _>(0) {
        return Some(Value::from(s));
    }
    row.try_get::<f64, _>(0).ok().map(Value::from)
}
