//! Campus Program Enrollment API
//!
//! HTTP service for enrolling learners into programs and their course runs.
//! Built with Axum on a PostgreSQL store; program metadata comes from a
//! JSON catalog file loaded at startup.

mod catalog;
mod config;
mod health;
mod logging;

use axum::{routing::get, Extension, Router};
use campus_api_enrollments::services::NullGateway;
use campus_api_enrollments::{enrollments_router, EnrollmentsState};
use campus_db::{run_migrations, DbPool};
use config::Config;
use health::{health_handler, readyz_handler};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        "Starting enrollment API"
    );

    // Program catalog (read once; programs are managed out of band)
    let program_catalog = match catalog::load_catalog(&config.catalog_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load program catalog: {e}");
            std::process::exit(1);
        }
    };

    // Database pool and migrations
    let db = match DbPool::connect(&config.database_url).await {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&db).await {
        eprintln!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }
    info!("Database migrations applied");

    let pool = db.into_inner();

    let state = EnrollmentsState::new(
        pool.clone(),
        Arc::new(program_catalog),
        Arc::new(NullGateway),
    );

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/readyz", get(readyz_handler))
        .nest("/api/v1", enrollments_router(state))
        .layer(Extension(pool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
