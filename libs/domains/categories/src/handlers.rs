use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

const TAG: &str = "Categories";

/// OpenAPI documentation for Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        create_category,
        get_category,
        update_category,
        delete_category,
    ),
    components(
        schemas(Category, CreateCategory, UpdateCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Category management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the categories router with all HTTP endpoints
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(shared_service)
}

/// List categories, newest first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(CategoryFilter),
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedQuery(filter): ValidatedQuery<CategoryFilter>,
) -> CategoryResult<Json<Vec<Category>>> {
    let categories = service.list_categories(filter).await?;
    Ok(Json(categories))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateCategory,
    responses(
        (status = 200, description = "Category created", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<Json<Category>> {
    let category = service.create_category(input).await?;
    Ok(Json(category))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<Json<Category>> {
    let category = service.get_category(id).await?;
    Ok(Json(category))
}

/// Update a category; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 204, description = "Category updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<StatusCode> {
    service.update_category(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted, or did not exist"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<StatusCode> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
