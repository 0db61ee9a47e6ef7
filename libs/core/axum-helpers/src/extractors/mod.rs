//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::errors::AppError), so malformed
//! input always produces the standard JSON error body.

pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
