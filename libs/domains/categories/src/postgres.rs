use async_trait::async_trait;
use database::{BaseRepository, RepositoryError};
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};
use uuid::Uuid;

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, CategoryFilter, CreateCategory, UpdateCategory, next_updated_at},
    repository::CategoryRepository,
};

pub struct PgCategoryRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// One equality condition per set filter field.
fn filtered(filter: &CategoryFilter) -> Select<entity::Entity> {
    let mut query = entity::Entity::find();

    if let Some(name) = &filter.name {
        query = query.filter(entity::Column::Name.eq(name.as_str()));
    }

    query
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let query = filtered(&filter);
        let models = self.base.paginate(query, filter.limit, filter.offset).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category> {
        let updated = self
            .base
            .update_with_lock(id, |model| {
                let previous = model.updated_at.with_timezone(&chrono::Utc);
                let mut active: entity::ActiveModel = model.into();
                if let Some(name) = input.name {
                    active.name = Set(name);
                }
                active.updated_at = Set(next_updated_at(previous).into());
                active
            })
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        match self.base.delete_by_id(id).await {
            Ok(rows_affected) => Ok(rows_affected > 0),
            Err(RepositoryError::InvalidReference(_)) => Err(CategoryError::InUse(id)),
            Err(e) => Err(e.into()),
        }
    }
}
