use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Category, CreateCategory};

/// Sea-ORM Entity for the categories table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub name: String,
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

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            name: model.name,
        }
    }
}

impl From<CreateCategory> for ActiveModel {
    fn from(input: CreateCategory) -> Self {
        let category = Category::new(input);

        ActiveModel {
            id: Set(category.id),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
            name: Set(category.name),
        }
    }
}
