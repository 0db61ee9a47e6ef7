use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (UUIDv7)
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Stock keeping unit, unique across products
    pub sku: String,
    /// Display name
    pub name: String,
    pub description: String,
    /// Price in the smallest currency unit
    pub price: i64,
    /// Owning category
    pub category_id: Uuid,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    pub category_id: Uuid,
}

/// DTO for updating a product. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 64))]
    pub sku: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub category_id: Option<Uuid>,
}

/// Query filters for listing products. Every filter is an exact match.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: u64,
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u64,
}

/// The current time, or one microsecond past `previous` if the clock has not
/// moved beyond it. Microseconds match the `timestamptz` resolution.
pub(crate) fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + TimeDelta::microseconds(1))
}

/// Postgres binds OFFSET as a signed 64-bit integer
const MAX_OFFSET: u64 = i64::MAX as u64;

fn default_limit() -> u64 {
    100
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            sku: None,
            name: None,
            category_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            sku: input.sku,
            name: input.name,
            description: input.description,
            price: input.price,
            category_id: input.category_id,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = next_updated_at(self.updated_at);
    }

    pub fn matches(&self, filter: &ProductFilter) -> bool {
        filter.sku.as_ref().is_none_or(|sku| &self.sku == sku)
            && filter.name.as_ref().is_none_or(|name| &self.name == name)
            && filter.category_id.is_none_or(|id| self.category_id == id)
    }
}
