//! Product Service - use cases over a `ProductRepository`

use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service
///
/// Input is validated by the HTTP layer (`ValidatedJson`) before it gets here.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = self.repository.create(input).await?;

        info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products matching every set filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        self.repository.list(filter).await
    }

    /// Update a product, keeping the fields `input` leaves out
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let product = self.repository.update(id, input).await?;

        info!(product_id = %id, "Updated product");
        Ok(product)
    }

    /// Delete a product. Deleting an unknown id succeeds.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            info!(product_id = %id, "Deleted product");
        } else {
            debug!(product_id = %id, "Product to delete did not exist");
        }

        Ok(())
    }
}
