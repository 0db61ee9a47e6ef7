//! Generic CRUD mechanics over a SeaORM entity keyed by UUID.
//!
//! Domain crates wrap [`BaseRepository`] in their own repository type and keep
//! only the entity-specific parts (DTO to active model, filter to condition).

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Select, SqlErr, TransactionTrait,
};
use std::marker::PhantomData;
use tracing::debug;
use uuid::Uuid;

/// Storage failures, classified
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    AlreadyExists(String),

    /// A foreign key points at a missing row
    #[error("Foreign key constraint violated: {0}")]
    InvalidReference(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::AlreadyExists(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::InvalidReference(detail),
            _ => Self::Database(err),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// An entity with a UUID primary key and a creation timestamp.
pub trait UuidEntity: EntityTrait {
    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;
}

/// Transactional CRUD for one entity type.
///
/// Each write runs in its own transaction. Returning early (or `?`) drops the
/// transaction uncommitted, which rolls it back.
#[derive(Debug)]
pub struct BaseRepository<E: UuidEntity> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E: UuidEntity> Clone for BaseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> BaseRepository<E>
where
    E: UuidEntity,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Insert a row and return it as stored.
    pub async fn insert<A>(&self, model: A) -> RepositoryResult<E::Model>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let txn = self.db.begin().await?;
        let created = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<E::Model>> {
        let model = E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await?;

        Ok(model)
    }

    /// Lock the row (`SELECT ... FOR UPDATE`), let `apply` turn it into an
    /// active model with the changes set, write it and commit.
    ///
    /// Returns `Ok(None)` when no row has this id.
    pub async fn update_with_lock<A, F>(&self, id: Uuid, apply: F) -> RepositoryResult<Option<E::Model>>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
        F: FnOnce(E::Model) -> A + Send,
    {
        let txn = self.db.begin().await?;

        let Some(current) = E::find()
            .filter(E::id_column().eq(id))
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            debug!(%id, "Row to update not found");
            return Ok(None);
        };

        let updated = apply(current).update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated))
    }

    /// Delete by id, returning the number of rows removed (0 or 1).
    pub async fn delete_by_id(&self, id: Uuid) -> RepositoryResult<u64> {
        let txn = self.db.begin().await?;
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(result.rows_affected)
    }

    /// Run `select` newest first, one page at a time.
    pub async fn paginate(&self, select: Select<E>, limit: u64, offset: u64) -> RepositoryResult<Vec<E::Model>> {
        let models = Self::page_query(select, limit, offset)
            .all(&self.db)
            .await?;

        Ok(models)
    }

    /// Order by `created_at` then `id`, both descending, and apply the window.
    pub fn page_query(select: Select<E>, limit: u64, offset: u64) -> Select<E> {
        select
            .order_by_desc(E::created_at_column())
            .order_by_desc(E::id_column())
            .limit(limit)
            .offset(offset)
    }
}
