use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(unique)]
    pub sku: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: i64,
    pub category_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl database::UuidEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn created_at_column() -> Column {
        Column::CreatedAt
    }
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            sku: model.sku,
            name: model.name,
            description: model.description,
            price: model.price,
            category_id: model.category_id,
        }
    }
}

impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        let product = Product::new(input);

        ActiveModel {
            id: Set(product.id),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
            sku: Set(product.sku),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            category_id: Set(product.category_id),
        }
    }
}
