use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tokio::signal;

use pokeleague_backend::config::Config;
use pokeleague_backend::db::{create_pool, run_migrations};
use pokeleague_backend::http::{configure_routes, AppState};
use pokeleague_backend::middleware::cors_middleware;
use pokeleague_backend::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize telemetry
    init_telemetry(&config.server.rust_log);

    // Create database pool
    let db_pool = create_pool(&config)
        .await
        .context("Failed to create database pool")?;

    run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let state = AppState::new(db_pool.clone(), config.playoffs);

    tracing::info!(
        cut_round = config.playoffs.cut_round,
        finals_round = config.playoffs.finals_round,
        "Starting league backend server on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(state.clone()))
            .wrap(cors_middleware())
            .wrap(actix_web::middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await?;
    Ok(())
}
