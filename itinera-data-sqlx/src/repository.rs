use crate::bind::bind_params;
use crate::error::SqlxErrorExt;
use crate::mapper::RowMapper;
use itinera_data::{
    DataError, Dialect, EntityDescriptor, EntityStatements, Filter, QueryOptions, Repository,
    Statement, UNSAVED_ID,
};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::Row;
use std::sync::Arc;

/// Generic CRUD driver for one entity family over SQLite.
///
/// Holds the pool, the family descriptor and an injected row mapper; every
/// other behavior is derived. One operation acquires one connection, runs
/// one statement and releases the connection on return.
pub struct EntityRepository<T> {
    pool: SqlitePool,
    descriptor: Arc<EntityDescriptor<T>>,
    mapper: RowMapper<T>,
}

impl<T> EntityRepository<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(pool: SqlitePool, descriptor: EntityDescriptor<T>, mapper: RowMapper<T>) -> Self {
        EntityRepository {
            pool,
            descriptor: Arc::new(descriptor),
            mapper,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn descriptor(&self) -> &EntityDescriptor<T> {
        &self.descriptor
    }

    fn statements(&self) -> EntityStatements<'_, T> {
        EntityStatements::new(&self.descriptor, Dialect::Sqlite)
    }

    async fn conn(&self) -> Result<PoolConnection<Sqlite>, DataError> {
        self.pool.acquire().await.map_err(SqlxErrorExt::into_data_error)
    }

    async fn fetch_mapped(&self, stmt: &Statement) -> Result<Vec<T>, DataError> {
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "select");
        let mut conn = self.conn().await?;
        let rows = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_all(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        rows.iter()
            .map(self.mapper)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(SqlxErrorExt::into_data_error)
    }

    /// Filtered listing with ordering and pagination modifiers.
    pub async fn search_with(
        &self,
        filter: &Filter,
        options: &QueryOptions,
    ) -> Result<Vec<T>, DataError> {
        let stmt = self.statements().select_with(filter, options)?;
        self.fetch_mapped(&stmt).await
    }

    /// `true` when at least one row matches the filter.
    pub async fn exists(&self, filter: &Filter) -> Result<bool, DataError> {
        let stmt = self.statements().exists(filter)?;
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "exists");
        let mut conn = self.conn().await?;
        let row = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(row.is_some())
    }
}

impl<T> Repository<T> for EntityRepository<T>
where
    T: Send + Sync + 'static,
{
    async fn find_all(&self) -> Result<Vec<T>, DataError> {
        let stmt = self.statements().select(&Filter::new())?;
        self.fetch_mapped(&stmt).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, DataError> {
        let stmt = self.statements().select_by_id(id);
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "select by id");
        let mut conn = self.conn().await?;
        let row = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        match row {
            Some(row) => {
                let entity = (self.mapper)(&row).map_err(SqlxErrorExt::into_data_error)?;
                Ok(Some(entity))
            }
            None => Ok(None),
        }
    }

    async fn search(&self, filter: &Filter) -> Result<Vec<T>, DataError> {
        let stmt = self.statements().select(filter)?;
        self.fetch_mapped(&stmt).await
    }

    async fn count(&self, filter: &Filter) -> Result<u64, DataError> {
        let stmt = self.statements().count(filter)?;
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "count");
        let mut conn = self.conn().await?;
        let row = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_one(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        let count: i64 = row.try_get(0).map_err(SqlxErrorExt::into_data_error)?;
        Ok(count as u64)
    }

    async fn create(&self, entity: T) -> Result<T, DataError> {
        let mut entity = entity;
        let stmt = self.statements().insert(&entity);
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "insert");
        let mut conn = self.conn().await?;
        let result = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        self.descriptor.assign_id(&mut entity, result.last_insert_rowid());
        Ok(entity)
    }

    async fn update(&self, entity: &T) -> Result<bool, DataError> {
        let id = self.descriptor.id_of(entity);
        if id == UNSAVED_ID {
            return Err(DataError::validation(format!(
                "cannot update an unsaved {}",
                self.descriptor.entity()
            )));
        }
        self.update_with_id(entity, id).await
    }

    async fn update_with_id(&self, entity: &T, id: i64) -> Result<bool, DataError> {
        let stmt = self.statements().update(entity, id);
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "update");
        let mut conn = self.conn().await?;
        let result = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DataError> {
        let stmt = self.statements().delete(id);
        tracing::debug!(entity = self.descriptor.entity(), sql = %stmt.sql, "delete");
        let mut conn = self.conn().await?;
        let result = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(result.rows_affected() > 0)
    }
}

impl<T> Clone for EntityRepository<T> {
    fn clone(&self) -> Self {
        EntityRepository {
            pool: self.pool.clone(),
            descriptor: self.descriptor.clone(),
            mapper: self.mapper,
        }
    }
}
