use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::{error, info};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    let config = Config::load()?;

    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(&config.database).await?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState { config, db };

    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server).await?;

    // Merge health endpoints
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone()));

    info!("Starting Catalog API with graceful shutdown (30s timeout)");

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            match db.close().await {
                Ok(()) => info!("PostgreSQL connection closed successfully"),
                Err(e) => error!("Error closing PostgreSQL connection: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
