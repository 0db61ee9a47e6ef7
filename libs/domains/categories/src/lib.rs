//! Categories Domain
//!
//! Product categories: a named bucket every product belongs to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Logging, NotFound, idempotent delete
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory + PostgreSQL)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Category, DTOs, filter
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::{
//!     handlers,
//!     repository::InMemoryCategoryRepository,
//!     service::CategoryService,
//! };
//!
//! let repository = InMemoryCategoryRepository::new();
//! let service = CategoryService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CategoryFilter, CreateCategory, UpdateCategory};
pub use postgres::PgCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
