//! Pg — PostgreSQL pool construction, catalog queries, and emulated upsert.

use std::path::Path;

use serde_json::Value;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use super::error::{DbError, Result};
use super::model::{Criterion, PrimaryKey};
use super::pgpass::parse_pgpass;
use super::sql::{self, Placeholder};

/// Connect a small pool using credentials from a `.pgpass`-style file.
pub async fn pg_pool(pgpass_path: impl AsRef<Path>) -> Result<PgPool> {
    let creds = parse_pgpass(pgpass_path)?;

    tracing::debug!(
        host = %creds.host,
        port = creds.port,
        dbname = %creds.dbname,
        user = %creds.user,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&creds.url())
        .await?;

    Ok(pool)
}

/// User-schema table names (everything outside `pg_catalog` and
/// `information_schema`).
pub async fn pg_table_names(pool: &PgPool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT tablename
        FROM pg_catalog.pg_tables
        WHERE schemaname NOT IN ('pg_catalog', 'information_schema')
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// User-schema view names.
pub async fn pg_view_names(pool: &PgPool) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT viewname
        FROM pg_catalog.pg_views
        WHERE schemaname NOT IN ('pg_catalog', 'information_schema')
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// First primary-key column of a table.
/// REF https://wiki.postgresql.org/wiki/Retrieve_primary_key_columns
pub async fn pg_primary_key(pool: &PgPool, table: &str) -> Result<String> {
    let column = sqlx::query_scalar::<_, String>(
        r#"
        SELECT a.attname
        FROM pg_index i
        JOIN pg_attribute a ON a.attrelid = i.indrelid
            AND a.attnum = ANY (i.indkey)
        WHERE i.indrelid = $1::regclass
            AND i.indisprimary
        "#,
    )
    .bind(sql::quote_ident(table))
    .fetch_optional(pool)
    .await?;

    column.ok_or_else(|| DbError::not_found(format!("no primary key on table '{table}'")))
}

/// True iff a row matching the criterion exists.
pub async fn row_exists(pool: &PgPool, table: &str, criterion: &Criterion) -> Result<bool> {
    let stmt = sql::exists_sql(table, &criterion.column, Placeholder::Dollar);
    let row = bind_value(sqlx::query(&stmt), &criterion.value)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>(0))
}

/// Emulated upsert: inside one transaction, probe for the key, then
/// `UPDATE … RETURNING` or `INSERT … RETURNING`.  Returns the stored
/// primary-key value.
pub async fn upsert(
    pool: &PgPool,
    table: &str,
    pkey: &PrimaryKey,
    columns: &[(String, Value)],
) -> Result<Value> {
    let mut tx = pool.begin().await?;

    let stmt = sql::exists_sql(table, &pkey.column, Placeholder::Dollar);
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
            let stmt = sql::update_sql(table, &pkey.column, &names, Placeholder::Dollar);
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
        let stmt = sql::insert_sql(table, &pkey.column, &names, Placeholder::Dollar);
        let mut query = bind_value(sqlx::query(&stmt), &pkey.value);
        for (_, value) in columns {
            query = bind_value(query, value);
        }
        let row = query.fetch_one(&mut *tx).await?;
        pk_from_row(&row).unwrap_or_else(|| pkey.value.clone())
    };

    tx.commit().await?;

    tracing::debug!(table, pk = %pkey.column, returned = %returned, "Upsert committed");
    Ok(returned)
}

/// Bind a JSON value with the closest Postgres type.
fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    value: &Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
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
fn pk_from_row(row: &PgRow) -> Option<Value> {
    if let Ok(i) = row.try_get::<i64, _>(0) {
        return Some(Value::from(i));
    }
    if let Ok(i) = row.try_get::<i32, _>(0) {
        return Some(Value::from(i));
    }
    if let Ok(s) = row.try_get::<String, _>(0) {
        return Some(Value::from(s));
    }
    if let Ok(b) = row.try_get::<bool, _>(0) {
        return Some(Value::from(b));
    }
    row.try_get::<f64, _>(0).ok().map(Value::from)
}
