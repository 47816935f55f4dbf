use cafe_data::{connect_sqlite, DataError, Entity, SqlxErrorExt};

struct Widget {
    id: i64,
}

impl Entity for Widget {
    type Id = i64;

    fn table_name() -> &'static str {
        "widget"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "label", "color"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }
}

#[test]
fn entity_column_helpers() {
    assert_eq!(Widget::column_list(), "id, label, color");
    assert_eq!(Widget::data_columns(), vec!["label", "color"]);
    assert_eq!(*Widget { id: 9 }.id(), 9);
}

#[tokio::test]
async fn in_memory_pool_shares_one_database() {
    let pool = connect_sqlite("sqlite::memory:", 8).await.unwrap();
    sqlx::query("CREATE TABLE widget (id INTEGER PRIMARY KEY, label TEXT NOT NULL UNIQUE)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO widget (label) VALUES ('a')")
        .execute(&pool)
        .await
        .unwrap();

    // A second checkout must see the table created by the first.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM widget")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn unique_violation_is_mapped() {
    let pool = connect_sqlite("sqlite::memory:", 1).await.unwrap();
    sqlx::query("CREATE TABLE widget (id INTEGER PRIMARY KEY, label TEXT NOT NULL UNIQUE)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO widget (label) VALUES ('dup')")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query("INSERT INTO widget (label) VALUES ('dup')")
        .execute(&pool)
        .await
        .map_err(SqlxErrorExt::into_data_error)
        .unwrap_err();
    match err {
        DataError::UniqueViolation { field } => assert_eq!(field, "label"),
        other => panic!("expected UniqueViolation, got {other}"),
    }
}

#[tokio::test]
async fn row_not_found_is_mapped() {
    let pool = connect_sqlite("sqlite::memory:", 1).await.unwrap();
    let err = sqlx::query_scalar::<_, i64>("SELECT 1 WHERE 1 = 0")
        .fetch_one(&pool)
        .await
        .map_err(SqlxErrorExt::into_data_error)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn file_database_is_created_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cafes.db");
    assert!(!path.exists());

    let url = format!("sqlite://{}", path.display());
    let pool = connect_sqlite(&url, 2).await.unwrap();
    sqlx::query("SELECT 1").execute(&pool).await.unwrap();
    pool.close().await;

    assert!(path.exists());
}
