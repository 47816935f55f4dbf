use crate::error::DataError;
use std::future::Future;

/// Async repository contract for a single entity type.
///
/// Uses return-position `impl Trait` in traits, no `async-trait` needed.
/// Every mutating call commits on its own; the trait exposes no transaction
/// boundaries.
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync + 'static,
    ID: Send + Sync + 'static,
{
    /// Id-less payload accepted by `insert` and `update`.
    type Draft: Send + Sync;

    fn find_by_id(&self, id: &ID) -> impl Future<Output = Result<Option<T>, DataError>> + Send;
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;
    /// Persist a new row; the repository assigns the id.
    fn insert(&self, draft: &Self::Draft) -> impl Future<Output = Result<T, DataError>> + Send;
    /// Replace every mutable column of row `id`. `Ok(None)` when the row does not exist.
    fn update(
        &self,
        id: &ID,
        draft: &Self::Draft,
    ) -> impl Future<Output = Result<Option<T>, DataError>> + Send;
    /// `Ok(false)` when the row does not exist.
    fn delete(&self, id: &ID) -> impl Future<Output = Result<bool, DataError>> + Send;
    fn count(&self) -> impl Future<Output = Result<u64, DataError>> + Send;
}
