use cafe_data::{DataError, Entity, Repository, SqlxErrorExt};
use sqlx::query::QueryAs;
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;

use crate::models::{Cafe, CafeDraft};

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS cafe (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(250) NOT NULL UNIQUE,
    map_url VARCHAR(500) NOT NULL,
    img_url VARCHAR(500) NOT NULL,
    location VARCHAR(250) NOT NULL,
    seats VARCHAR(250) NOT NULL,
    has_toilet BOOLEAN NOT NULL,
    has_wifi BOOLEAN NOT NULL,
    has_sockets BOOLEAN NOT NULL,
    can_take_calls BOOLEAN NOT NULL,
    coffee_price VARCHAR(250)
)";

/// Cafe repository over a SQLite pool. Ids are never reused.
#[derive(Clone)]
pub struct SqliteCafeRepository {
    pool: SqlitePool,
}

impl SqliteCafeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `cafe` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DataError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        tracing::debug!(table = Cafe::table_name(), "schema ready");
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), DataError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(())
    }
}

/// Bind the draft in `Cafe::data_columns()` order.
fn bind_draft<'q>(
    query: QueryAs<'q, Sqlite, Cafe, SqliteArguments<'q>>,
    draft: &'q CafeDraft,
) -> QueryAs<'q, Sqlite, Cafe, SqliteArguments<'q>> {
    query
        .bind(&draft.name)
        .bind(&draft.map_url)
        .bind(&draft.img_url)
        .bind(&draft.location)
        .bind(&draft.seats)
        .bind(draft.has_toilet)
        .bind(draft.has_wifi)
        .bind(draft.has_sockets)
        .bind(draft.can_take_calls)
        .bind(&draft.coffee_price)
}

fn insert_sql() -> String {
    let columns = Cafe::data_columns();
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({placeholders}) RETURNING {}",
        Cafe::table_name(),
        columns.join(", "),
        Cafe::column_list(),
    )
}

fn update_sql() -> String {
    let assignments = Cafe::data_columns()
        .iter()
        .map(|c| format!("{c} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE {} = ? RETURNING {}",
        Cafe::table_name(),
        Cafe::id_column(),
        Cafe::column_list(),
    )
}

impl Repository<Cafe, i64> for SqliteCafeRepository {
    type Draft = CafeDraft;

    async fn find_by_id(&self, id: &i64) -> Result<Option<Cafe>, DataError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            Cafe::column_list(),
            Cafe::table_name(),
            Cafe::id_column()
        );
        sqlx::query_as::<_, Cafe>(&sql)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn find_all(&self) -> Result<Vec<Cafe>, DataError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            Cafe::column_list(),
            Cafe::table_name(),
            Cafe::id_column()
        );
        sqlx::query_as::<_, Cafe>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn insert(&self, draft: &CafeDraft) -> Result<Cafe, DataError> {
        let sql = insert_sql();
        bind_draft(sqlx::query_as::<_, Cafe>(&sql), draft)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn update(&self, id: &i64, draft: &CafeDraft) -> Result<Option<Cafe>, DataError> {
        let sql = update_sql();
        bind_draft(sqlx::query_as::<_, Cafe>(&sql), draft)
            .bind(*id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn delete(&self, id: &i64) -> Result<bool, DataError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            Cafe::table_name(),
            Cafe::id_column()
        );
        let result = sqlx::query(&sql)
            .bind(*id)
            .execute(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DataError> {
        let sql = format!("SELECT COUNT(*) FROM {}", Cafe::table_name());
        let total: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(total as u64)
    }
}
