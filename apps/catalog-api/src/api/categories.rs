//! Categories API routes

use axum::Router;
use domain_categories::{CategoryService, PgCategoryRepository, handlers};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let service = CategoryService::new(PgCategoryRepository::new(state.db.clone()));
    handlers::router(service)
}
