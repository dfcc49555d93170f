use crate::error::DataError;
use crate::filter::Filter;
use std::future::Future;

/// Generic async repository contract for one entity family.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed. Identities are `i64` store-generated keys; a missing row is an
/// `Ok` outcome (`None`, `false`, empty `Vec`), never an error.
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;
    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<T>, DataError>> + Send;
    /// Filtered listing; unmapped filter keys are rejected.
    fn search(&self, filter: &Filter) -> impl Future<Output = Result<Vec<T>, DataError>> + Send;
    fn count(&self, filter: &Filter) -> impl Future<Output = Result<u64, DataError>> + Send;
    /// Persist a new entity and return it with the generated id assigned.
    fn create(&self, entity: T) -> impl Future<Output = Result<T, DataError>> + Send;
    /// Overwrite the row carrying the entity's own identity; `false` when no
    /// row matched. Updating an entity that was never saved is a
    /// [`DataError::Validation`].
    fn update(&self, entity: &T) -> impl Future<Output = Result<bool, DataError>> + Send;
    /// Overwrite the row with identity `id`, ignoring the entity's own id.
    fn update_with_id(
        &self,
        entity: &T,
        id: i64,
    ) -> impl Future<Output = Result<bool, DataError>> + Send;
    fn delete(&self, id: i64) -> impl Future<Output = Result<bool, DataError>> + Send;
}
