use crate::bind::bind_params;
use crate::error::SqlxErrorExt;
use itinera_data::{DataError, Dialect, LinkDescriptor, LinkStatements, Statement};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqlitePool, SqliteQueryResult};
use sqlx::Row;
use std::future::Future;
use std::marker::PhantomData;

/// Turns a stored `(left, right)` pair into the caller-facing association
/// record, typically by loading one side through its entity repository.
///
/// Uses RPITIT like [`itinera_data::Repository`]. Returning `None` drops
/// the pair from listings, which is how a dangling reference left behind
/// by an out-of-band delete is handled.
pub trait Hydrate<R>: Send + Sync {
    fn hydrate(
        &self,
        left: i64,
        right: i64,
    ) -> impl Future<Output = Result<Option<R>, DataError>> + Send;
}

/// Driver for a two-sided link table.
///
/// Pairs have no surrogate identity; every operation addresses them by the
/// two foreign keys. Reads hydrate one record per pair, which is fine at
/// catalog scale but not built for bulk traversal.
pub struct LinkRepository<R, H> {
    pool: SqlitePool,
    descriptor: LinkDescriptor,
    hydrator: H,
    _marker: PhantomData<R>,
}

impl<R, H> LinkRepository<R, H>
where
    R: Send + Sync + 'static,
    H: Hydrate<R>,
{
    pub fn new(pool: SqlitePool, descriptor: LinkDescriptor, hydrator: H) -> Self {
        LinkRepository {
            pool,
            descriptor,
            hydrator,
            _marker: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &LinkDescriptor {
        &self.descriptor
    }

    fn statements(&self) -> LinkStatements<'_> {
        LinkStatements::new(&self.descriptor, Dialect::Sqlite)
    }

    async fn conn(&self) -> Result<PoolConnection<Sqlite>, DataError> {
        self.pool.acquire().await.map_err(SqlxErrorExt::into_data_error)
    }

    async fn execute(&self, stmt: &Statement) -> Result<SqliteQueryResult, DataError> {
        tracing::debug!(link = self.descriptor.table(), sql = %stmt.sql, "execute");
        let mut conn = self.conn().await?;
        bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn fetch_pairs(&self, stmt: &Statement) -> Result<Vec<(i64, i64)>, DataError> {
        tracing::debug!(link = self.descriptor.table(), sql = %stmt.sql, "select");
        let mut conn = self.conn().await?;
        let rows = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_all(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        rows.iter()
            .map(|row| Ok((row.try_get(0)?, row.try_get(1)?)))
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(SqlxErrorExt::into_data_error)
    }

    async fn hydrate_pairs(&self, pairs: Vec<(i64, i64)>) -> Result<Vec<R>, DataError> {
        let mut records = Vec::with_capacity(pairs.len());
        for (left, right) in pairs {
            if let Some(record) = self.hydrator.hydrate(left, right).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Store one pair. A duplicate pair violates the table's composite key
    /// and surfaces as [`DataError::Database`].
    pub async fn create(&self, left: i64, right: i64) -> Result<(), DataError> {
        let stmt = self.statements().insert(left, right);
        self.execute(&stmt).await?;
        Ok(())
    }

    /// Remove one pair; `false` when it was not stored.
    pub async fn delete(&self, left: i64, right: i64) -> Result<bool, DataError> {
        let stmt = self.statements().delete(left, right);
        Ok(self.execute(&stmt).await?.rows_affected() > 0)
    }

    /// Remove every pair for a left-side id, returning how many went away.
    pub async fn delete_all_by_left(&self, left: i64) -> Result<u64, DataError> {
        let stmt = self.statements().delete_all_by_left(left);
        Ok(self.execute(&stmt).await?.rows_affected())
    }

    pub async fn delete_all_by_right(&self, right: i64) -> Result<u64, DataError> {
        let stmt = self.statements().delete_all_by_right(right);
        Ok(self.execute(&stmt).await?.rows_affected())
    }

    pub async fn exists(&self, left: i64, right: i64) -> Result<bool, DataError> {
        let stmt = self.statements().exists(left, right);
        tracing::debug!(link = self.descriptor.table(), sql = %stmt.sql, "exists");
        let mut conn = self.conn().await?;
        let row = bind_params(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_optional(&mut *conn)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        Ok(row.is_some())
    }

    /// Raw stored pairs, ordered by left then right id.
    pub async fn pairs(&self) -> Result<Vec<(i64, i64)>, DataError> {
        let stmt = self.statements().select_all();
        self.fetch_pairs(&stmt).await
    }

    /// Right-side ids linked to `left`, ascending.
    pub async fn rights_of(&self, left: i64) -> Result<Vec<i64>, DataError> {
        let stmt = self.statements().select_by_left(left);
        let pairs = self.fetch_pairs(&stmt).await?;
        Ok(pairs.into_iter().map(|(_, right)| right).collect())
    }

    /// Left-side ids linked to `right`, ascending.
    pub async fn lefts_of(&self, right: i64) -> Result<Vec<i64>, DataError> {
        let stmt = self.statements().select_by_right(right);
        let pairs = self.fetch_pairs(&stmt).await?;
        Ok(pairs.into_iter().map(|(left, _)| left).collect())
    }

    pub async fn find_all(&self) -> Result<Vec<R>, DataError> {
        let pairs = self.pairs().await?;
        self.hydrate_pairs(pairs).await
    }

    pub async fn find_by_left(&self, left: i64) -> Result<Vec<R>, DataError> {
        let stmt = self.statements().select_by_left(left);
        let pairs = self.fetch_pairs(&stmt).await?;
        self.hydrate_pairs(pairs).await
    }

    pub async fn find_by_right(&self, right: i64) -> Result<Vec<R>, DataError> {
        let stmt = self.statements().select_by_right(right);
        let pairs = self.fetch_pairs(&stmt).await?;
        self.hydrate_pairs(pairs).await
    }
}

impl<R, H: Clone> Clone for LinkRepository<R, H> {
    fn clone(&self) -> Self {
        LinkRepository {
            pool: self.pool.clone(),
            descriptor: self.descriptor.clone(),
            hydrator: self.hydrator.clone(),
            _marker: PhantomData,
        }
    }
}
