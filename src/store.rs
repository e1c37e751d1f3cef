//! Database binding: pool construction, liveness check, and table sync for `products`.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// DDL for the product table. Idempotent.
const PRODUCTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        price DOUBLE PRECISION NOT NULL CHECK (price > 0),
        availability BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const PRODUCTS_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_name_idx ON products (name)";

/// Open a connection pool against `database_url`.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Round-trip to the server.
pub async fn authenticate(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `products` table and its index if they do not exist.
pub async fn sync(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(PRODUCTS_DDL).execute(pool).await?;
    sqlx::query(PRODUCTS_NAME_INDEX).execute(pool).await?;
    tracing::debug!("products table in sync");
    Ok(())
}

/// Create the target database if it does not exist, connecting to the
/// `postgres` maintenance database on the same server.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let (base, rest) = url.split_at(path_start);
    let (db_name, query) = match rest.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (rest.trim(), None),
    };
    let admin_url = match query {
        Some(q) => format!("{base}postgres?{q}"),
        None => format!("{base}postgres"),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
