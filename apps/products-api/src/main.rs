//! Products API - product inventory REST server

use axum_helpers::middleware::parse_allowed_origins;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = postgres::connect_from_config_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState { db };

    // Build REST router
    let allowed_origins = parse_allowed_origins(&config.allowed_origins)?;
    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, allowed_origins)
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    let db = state.db;
    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing PostgreSQL connections");
        postgres::close(db).await;
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
