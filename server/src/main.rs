//! Sample todo HTTP server.
//!
//! Serves the todo page backed by `PostgreSQL`.

use anyhow::Context;
use sample_todo_postgres::PostgresTodoStore;
use sample_todo_server::Config;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sample_todo_web::{build_router_with_metrics, AppState};
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal outside development
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sample_todo=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sample todo server");

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    spawn_metrics_upkeep(prometheus.clone());

    let config = Config::from_env();
    config.validate()?;
    info!(
        max_connections = config.postgres.max_connections,
        bind = %config.bind_address(),
        "Configuration loaded"
    );

    info!("Connecting to record store...");
    let store = PostgresTodoStore::connect(
        &config.postgres.url,
        config.postgres.max_connections,
        config.postgres.connect_timeout,
    )
    .await
    .context("Failed to connect to PostgreSQL")?;
    info!("Record store connected");

    let mut state = AppState::new(store);
    if let Some(hostname) = config.server.display_hostname.clone() {
        state = state.with_hostname(hostname);
    }
    let app = build_router_with_metrics(state, prometheus);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Runs the Prometheus recorder's periodic upkeep.
fn spawn_metrics_upkeep(handle: PrometheusHandle) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(5));
        loop {
            interval.tick().await;
            handle.run_upkeep();
        }
    });
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
