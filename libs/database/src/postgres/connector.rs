use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::retry_with_backoff;

/// Connect once using a PostgresConfig
///
/// # Example
/// ```ignore
/// use database::postgres::{PostgresConfig, connect_from_config};
///
/// let config = PostgresConfig::new("catalog", "app", "pw", "localhost", 5432);
/// let db = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.connect_options())
        .await
        .map_err(|e| scrub_password(e, config))?;
    info!(url = %config.redacted_url(), "Connected to PostgreSQL");
    Ok(db)
}

/// Driver errors can echo the connection string; keep the password out of
/// logs and reports.
fn scrub_password(err: DbErr, config: &PostgresConfig) -> DbErr {
    let text = err.to_string();
    let redacted = config.redact(&text);
    if redacted == text {
        err
    } else {
        DbErr::Custom(redacted)
    }
}

/// Connect with the retry policy from `config.retry`
///
/// Retries with exponential backoff, for databases that come up after the
/// service (compose, k8s).
pub async fn connect_from_config_with_retry(
    config: &PostgresConfig,
) -> Result<DatabaseConnection, DbErr> {
    retry_with_backoff(|| connect_from_config(config), config.retry.clone()).await
}

/// Apply every pending migration of `M`
///
/// # Example
/// ```ignore
/// use database::postgres::run_migrations;
/// use migration::Migrator;
///
/// run_migrations::<Migrator>(&db, "catalog_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}
