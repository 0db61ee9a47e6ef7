use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for categories
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = self.repository.create(input).await?;

        info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        let category = self.repository.update(id, input).await?;

        info!(category_id = %id, "Updated category");
        Ok(category)
    }

    /// Delete a category. Deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CategoryResult<()> {
        if self.repository.delete(id).await? {
            info!(category_id = %id, "Deleted category");
        } else {
            debug!(category_id = %id, "Category to delete did not exist");
        }

        Ok(())
    }
}
