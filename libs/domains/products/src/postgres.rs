use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductFilter, UpdateProduct, next_updated_at},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

/// One equality condition per set filter field.
fn filtered(filter: &ProductFilter) -> Select<entity::Entity> {
    let mut query = entity::Entity::find();

    if let Some(sku) = &filter.sku {
        query = query.filter(entity::Column::Sku.eq(sku.as_str()));
    }

    if let Some(name) = &filter.name {
        query = query.filter(entity::Column::Name.eq(name.as_str()));
    }

    if let Some(category_id) = filter.category_id {
        query = query.filter(entity::Column::CategoryId.eq(category_id));
    }

    query
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = self.base.insert(active_model).await?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let query = filtered(&filter);
        let models = self.base.paginate(query, filter.limit, filter.offset).await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let updated = self
            .base
            .update_with_lock(id, |model| {
                let previous = model.updated_at.with_timezone(&chrono::Utc);
                let mut active: entity::ActiveModel = model.into();
                if let Some(sku) = input.sku {
                    active.sku = Set(sku);
                }
                if let Some(name) = input.name {
                    active.name = Set(name);
                }
                if let Some(description) = input.description {
                    active.description = Set(description);
                }
                if let Some(price) = input.price {
                    active.price = Set(price);
                }
                if let Some(category_id) = input.category_id {
                    active.category_id = Set(category_id);
                }
                active.updated_at = Set(next_updated_at(previous).into());
                active
            })
            .await?
            .ok_or(ProductError::NotFound(id))?;

        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, QueryTrait};

    fn row(sku: &str) -> entity::Model {
        let now = chrono::Utc::now();
        entity::Model {
            id: Uuid::now_v7(),
            created_at: now.into(),
            updated_at: now.into(),
            sku: sku.to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            price: 100,
            category_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn test_filters_become_equality_conditions() {
        let category_id = Uuid::nil();
        let filter = ProductFilter {
            sku: Some("ABC".to_string()),
            category_id: Some(category_id),
            ..Default::default()
        };
        let sql = filtered(&filter)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""products"."sku" = 'ABC'"#));
        assert!(sql.contains(r#""products"."category_id" = '00000000-0000-0000-0000-000000000000'"#));
        assert!(!sql.contains(r#""products"."name" ="#));
    }

    #[test]
    fn test_list_query_is_ordered_and_paged() {
        let sql = BaseRepository::<entity::Entity>::page_query(
            filtered(&ProductFilter::default()),
            2,
            0,
        )
        .build(DatabaseBackend::Postgres)
        .to_string();

        assert!(!sql.contains("WHERE"));
        assert!(sql.contains(r#"ORDER BY "products"."created_at" DESC, "products"."id" DESC"#));
        assert!(sql.contains("LIMIT 2"));
    }

    #[tokio::test]
    async fn test_update_applies_present_fields() {
        let stored = row("X1");
        let mut changed = stored.clone();
        changed.price = 150;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()], vec![changed.clone()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .update(
                stored.id,
                UpdateProduct {
                    price: Some(150),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(product.price, 150);
        assert_eq!(product.sku, "X1");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let result = repo.update(Uuid::now_v7(), UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
