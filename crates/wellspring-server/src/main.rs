//! Wellspring Server: application entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wellspring_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use wellspring_db::{DbManager, purge, run_migrations};
use wellspring_server::{AppState, ServerConfig, build_router, seed};

#[derive(Parser)]
#[command(name = "wellspring-server", version, about = "Wellness session API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Apply schema migrations and exit.
    Migrate,
    /// Replace all data with demo users and sessions.
    Seed,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wellspring=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        db_url = %config.db_url,
        "Starting Wellspring"
    );

    let db = DbManager::connect(&config.db_config()).await?;
    run_migrations(db.client()).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            tracing::info!("Migrations applied");
            Ok(())
        }
        Command::Seed => {
            purge(db.client()).await?;
            let users = match config.pepper.clone() {
                Some(pepper) => SurrealUserRepository::with_pepper(db.client().clone(), pepper),
                None => SurrealUserRepository::new(db.client().clone()),
            };
            let sessions = SurrealSessionRepository::new(db.client().clone());
            seed::seed_demo_data(&users, &sessions).await?;
            Ok(())
        }
        Command::Serve => serve(config, db).await,
    }
}

async fn serve(config: ServerConfig, db: DbManager) -> anyhow::Result<()> {
    if config.jwt_secret.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("WELLSPRING_JWT_SECRET not set; register, login and verify will fail");
    }

    let state = AppState::new(db.client().clone(), config.auth_config());
    let app = build_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
