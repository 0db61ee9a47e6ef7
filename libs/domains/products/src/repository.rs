use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
///
/// Implementations enforce SKU uniqueness and report it as
/// `DuplicateSku`/`AlreadyExists`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List products, newest first, with exact-match filters
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Apply the present fields of `input` under a row lock
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID, `false` if nothing was deleted
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Category ids are not checked; there is no category table to check against.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.values().any(|p| p.sku == input.sku) {
            return Err(ProductError::DuplicateSku(input.sku));
        }

        let product = Product::new(input);
        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products
            .values()
            .filter(|p| p.matches(&filter))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&id) {
            return Err(ProductError::NotFound(id));
        }

        if let Some(ref new_sku) = input.sku {
            if products.values().any(|p| p.id != id && &p.sku == new_sku) {
                return Err(ProductError::DuplicateSku(new_sku.clone()));
            }
        }

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }
}
