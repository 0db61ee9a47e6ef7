use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// List categories, newest first
    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>>;

    /// Apply the present fields of `input`; `NotFound` if the id is unknown
    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category>;

    /// Delete a category by ID, `false` if nothing was deleted
    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        let category = Category::new(input);
        categories.insert(category.id, category.clone());

        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| c.matches(&filter))
            .cloned()
            .collect();

        // Same order as the SQL implementation: created_at, then id, descending
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        let category = categories.get_mut(&id).ok_or(CategoryError::NotFound(id))?;
        category.apply_update(input);

        Ok(category.clone())
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }
}
