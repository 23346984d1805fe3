//! # careportd — careport daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize tracing
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via the port trait
//! - Build the axum router, injecting resource state
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (ctrl-c)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use careport_adapter_http_axum::router;
use careport_adapter_http_axum::state::ResourceState;
use careport_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteDepartmentRepository, SqliteHospitalRepository,
};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories, services, and HTTP state
    let hospitals = ResourceState::new(SqliteHospitalRepository::new(pool.clone()));
    let departments = ResourceState::new(SqliteDepartmentRepository::new(pool));

    let app = router::build(hospitals, departments);

    let bind_addr = config.bind_addr();
    tracing::info!(%bind_addr, "careportd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown signal handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
