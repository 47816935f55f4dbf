//! Record store: the persistence abstraction over the `cafe` table.
//!
//! [`CafeStore`] exposes the catalog operations and turns missing rows into
//! `DataError::NotFound`. It runs over any [`Repository`] of cafes; the
//! application uses [`SqliteCafeRepository`], tests may also use
//! [`InMemoryCafeRepository`].

mod memory;
mod sqlite;

pub use memory::InMemoryCafeRepository;
pub use sqlite::SqliteCafeRepository;

use cafe_core::{HealthIndicator, HealthStatus};
use cafe_data::{DataError, Repository};

use crate::models::{Cafe, CafeDraft};

#[derive(Clone)]
pub struct CafeStore<R = SqliteCafeRepository> {
    repo: R,
}

impl<R> CafeStore<R>
where
    R: Repository<Cafe, i64, Draft = CafeDraft>,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Every cafe, in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Cafe>, DataError> {
        self.repo.find_all().await
    }

    pub async fn get(&self, id: i64) -> Result<Cafe, DataError> {
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Persist a new cafe. Fails with `UniqueViolation` when the name is taken.
    pub async fn create(&self, draft: &CafeDraft) -> Result<Cafe, DataError> {
        let cafe = self.repo.insert(draft).await?;
        tracing::info!(cafe_id = cafe.id, name = %cafe.name, "cafe created");
        Ok(cafe)
    }

    /// Replace every mutable field of cafe `id`.
    pub async fn update(&self, id: i64, draft: &CafeDraft) -> Result<Cafe, DataError> {
        let cafe = self
            .repo
            .update(&id, draft)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(cafe_id = id, "cafe updated");
        Ok(cafe)
    }

    /// Hard delete. Deleting an id that is already gone is `NotFound`.
    pub async fn delete(&self, id: i64) -> Result<(), DataError> {
        if !self.repo.delete(&id).await? {
            return Err(not_found(id));
        }
        tracing::info!(cafe_id = id, "cafe deleted");
        Ok(())
    }

    pub async fn count(&self) -> Result<u64, DataError> {
        self.repo.count().await
    }
}

impl CafeStore<SqliteCafeRepository> {
    /// Open the database at `url` and create the table if it is missing.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, DataError> {
        let pool = cafe_data::connect_sqlite(url, max_connections).await?;
        let repo = SqliteCafeRepository::new(pool);
        repo.ensure_schema().await?;
        Ok(Self::new(repo))
    }
}

impl HealthIndicator for CafeStore<SqliteCafeRepository> {
    fn name(&self) -> &str {
        "db"
    }

    async fn check(&self) -> HealthStatus {
        match self.repo.ping().await {
            Ok(()) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}

fn not_found(id: i64) -> DataError {
    DataError::NotFound(format!("No cafe with id {id}"))
}
