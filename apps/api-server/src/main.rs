//! # Petboard API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::handlers;
use api_server::observability::RequestIdMiddleware;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppConfig, AppState};
use petboard_core::ports::TokenService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Petboard API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config.database, config.run_migrations, config.jwt.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize database");
            std::io::Error::other(e)
        })?;
    let tokens: Arc<dyn TokenService> = state.tokens.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
