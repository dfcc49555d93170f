use crate::mapper::RowMapper;
use crate::repository::EntityRepository;
use itinera_data::{DataError, EntityDescriptor, Filter, Repository};
use sqlx::sqlite::SqlitePool;

/// Driver for the small classifier families (`*_types` tables).
///
/// Wraps the generic driver and adds name-oriented lookups over the filter
/// vocabulary, so the descriptor must map both `name` and `keyword`. The
/// name contract itself (non-blank, unique within the family) is a caller
/// concern: services enforce it with the probes here before writing, the
/// driver never rejects a write on its own.
pub struct TypeRepository<T> {
    inner: EntityRepository<T>,
}

impl<T> TypeRepository<T>
where
    T: Send + Sync + 'static,
{
    /// # Panics
    ///
    /// When the descriptor lacks a name accessor or does not map the
    /// `name` and `keyword` filter keys.
    pub fn new(pool: SqlitePool, descriptor: EntityDescriptor<T>, mapper: RowMapper<T>) -> Self {
        assert!(
            descriptor.has_name_accessor(),
            "type family '{}' requires a name accessor",
            descriptor.entity()
        );
        assert!(
            descriptor.columns().contains("name") && descriptor.columns().contains("keyword"),
            "type family '{}' must map the 'name' and 'keyword' filter keys",
            descriptor.entity()
        );
        TypeRepository {
            inner: EntityRepository::new(pool, descriptor, mapper),
        }
    }

    /// The wrapped generic driver.
    pub fn repository(&self) -> &EntityRepository<T> {
        &self.inner
    }

    /// Substring listing over names, case semantics per the store's `LIKE`.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<T>, DataError> {
        self.inner.search(&Filter::new().with("keyword", name)).await
    }

    /// Exact-name lookup. At most one row can match while callers keep the
    /// uniqueness contract.
    pub async fn find_by_exact_name(&self, name: &str) -> Result<Option<T>, DataError> {
        let mut matches = self.inner.search(&Filter::new().with("name", name)).await?;
        Ok(if matches.is_empty() {
            None
        } else {
            Some(matches.remove(0))
        })
    }

    pub async fn exists_with_name(&self, name: &str) -> Result<bool, DataError> {
        self.inner.exists(&Filter::new().with("name", name)).await
    }
}

impl<T> Repository<T> for TypeRepository<T>
where
    T: Send + Sync + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, DataError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, DataError> {
        self.inner.find_by_id(id).await
    }

    async fn search(&self, filter: &Filter) -> Result<Vec<T>, DataError> {
        self.inner.search(filter).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, DataError> {
        self.inner.count(filter).await
    }

    async fn create(&self, entity: T) -> Result<T, DataError> {
        self.inner.create(entity).await
    }

    async fn update(&self, entity: &T) -> Result<bool, DataError> {
        self.inner.update(entity).await
    }

    async fn update_with_id(&self, entity: &T, id: i64) -> Result<bool, DataError> {
        self.inner.update_with_id(entity, id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DataError> {
        self.inner.delete(id).await
    }
}

impl<T> Clone for TypeRepository<T> {
    fn clone(&self) -> Self {
        TypeRepository {
            inner: self.inner.clone(),
        }
    }
}
