//! SQLite bridging: error conversion and pool construction.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::DataError;

/// Extension trait for converting `sqlx::Error` into `DataError`.
///
/// Use `.map_err(SqlxErrorExt::into_data_error)` at the driver boundary.
pub trait SqlxErrorExt {
    fn into_data_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        match &self {
            sqlx::Error::RowNotFound => DataError::NotFound("Row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => DataError::UniqueViolation {
                field: unique_violation_column(db.message()),
            },
            _ => DataError::database(self),
        }
    }
}

/// Convenience alias for data-layer results.
pub type SqlxResult<T> = Result<T, DataError>;

/// Extract the column from SQLite's `UNIQUE constraint failed: table.column`.
///
/// Composite constraints report their first column; an unrecognised message
/// yields the message itself.
pub(crate) fn unique_violation_column(message: &str) -> String {
    let Some((_, columns)) = message.split_once("failed:") else {
        return message.to_string();
    };
    let first = columns.split(',').next().unwrap_or(columns).trim();
    first.rsplit('.').next().unwrap_or(first).to_string()
}

/// Whether `url` names an in-memory SQLite database.
pub fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open a SQLite pool, creating the database file when it does not exist.
///
/// An in-memory database lives as long as its connection, so in-memory URLs
/// get exactly one connection that is never recycled.
pub async fn connect_sqlite(url: &str, max_connections: u32) -> SqlxResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(SqlxErrorExt::into_data_error)?
        .create_if_missing(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    tracing::debug!(%url, in_memory = is_in_memory(url), "sqlite pool ready");
    Ok(pool)
}
