use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier (UUIDv7)
    pub id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// Display name
    pub name: String,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// DTO for updating a category. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
}

/// Query filters for listing categories
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    /// Exact name match
    pub name: Option<String>,
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

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            name: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: input.name,
        }
    }

    /// Apply the fields present in `update` and bump `updated_at`.
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.updated_at = next_updated_at(self.updated_at);
    }

    pub fn matches(&self, filter: &CategoryFilter) -> bool {
        filter.name.as_ref().is_none_or(|name| &self.name == name)
    }
}
