use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::RepositoryError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Product with SKU '{0}' already exists")]
    DuplicateSku(String),

    /// Unique violation reported by the database, detail as given
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    #[error("Category does not exist: {0}")]
    InvalidCategory(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<RepositoryError> for ProductError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::AlreadyExists(detail) => ProductError::AlreadyExists(detail),
            RepositoryError::InvalidReference(detail) => ProductError::InvalidCategory(detail),
            RepositoryError::Database(e) => ProductError::Database(e),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::DuplicateSku(sku) => {
                AppError::Conflict(format!("Product with SKU '{}' already exists", sku))
            }
            ProductError::AlreadyExists(_) => {
                AppError::Conflict("Product with this SKU already exists".to_string())
            }
            ProductError::InvalidCategory(_) => {
                AppError::InvalidReference("category_id does not refer to an existing category".to_string())
            }
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (ProductError::DuplicateSku("X1".into()), StatusCode::CONFLICT),
            (ProductError::AlreadyExists("idx_products_sku".into()), StatusCode::CONFLICT),
            (ProductError::InvalidCategory("fk".into()), StatusCode::BAD_REQUEST),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_foreign_key_violation_becomes_invalid_category() {
        let err = ProductError::from(RepositoryError::InvalidReference("fk_products_category_id".into()));
        assert!(matches!(err, ProductError::InvalidCategory(_)));
    }
}
