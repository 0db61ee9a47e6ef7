use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::RepositoryError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    #[error("Category already exists: {0}")]
    AlreadyExists(String),

    /// Products still point at the category
    #[error("Category {0} is still referenced by products")]
    InUse(Uuid),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<RepositoryError> for CategoryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(detail) => CategoryError::AlreadyExists(detail),
            RepositoryError::InvalidReference(detail) => CategoryError::InvalidReference(detail),
            RepositoryError::Database(e) => CategoryError::Database(e),
        }
    }
}

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => AppError::NotFound(format!("Category {} not found", id)),
            CategoryError::AlreadyExists(_) => {
                AppError::Conflict("Category already exists".to_string())
            }
            CategoryError::InUse(id) => {
                AppError::Conflict(format!("Category {} still has products", id))
            }
            CategoryError::InvalidReference(_) => AppError::InvalidReference(
                "Category refers to a resource that does not exist".to_string(),
            ),
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
