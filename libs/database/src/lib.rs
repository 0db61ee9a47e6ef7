//! Database library: PostgreSQL connection management and a generic repository
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(&config).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog_api").await?;
//!
//! let products = BaseRepository::<product::Entity>::new(db.clone());
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use repository::{BaseRepository, RepositoryError, RepositoryResult, UuidEntity};
