pub mod api;
pub mod cache;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod documents;
pub mod entities;
pub mod models;
pub mod parser;
pub mod services;
pub mod state;
pub mod synthetic;

use std::sync::Arc;
use tokio::signal;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands, FavoritesCommands};
pub use config::Config;
use state::SharedState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Database URL used by `--ephemeral`.
pub const EPHEMERAL_DATABASE: &str = "sqlite::memory:";

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if cli.ephemeral {
        config.general.database_path = EPHEMERAL_DATABASE.to_string();
    }
    config.validate()?;

    init_tracing(&config);

    let Some(command) = cli.command else {
        println!("Larder v{}", env!("CARGO_PKG_VERSION"));
        println!("Run `larder --help` for available commands.");
        return Ok(());
    };

    match command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            run_server(config).await
        }

        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists");
            }
            Ok(())
        }

        Commands::Search {
            query,
            domain,
            city,
            no_related,
        } => {
            let state = SharedState::new(config).await?;
            cli::cmd_search(&state, domain, &query.join(" "), city.as_deref(), !no_related).await
        }

        Commands::Popular { domain, limit } => {
            let state = SharedState::new(config).await?;
            cli::cmd_popular(&state, domain, limit).await
        }

        Commands::Favorites { command } => {
            let state = SharedState::new(config).await?;
            match command {
                FavoritesCommands::List { user_id, domain } => {
                    cli::cmd_favorites_list(&state, &user_id, domain).await
                }
                FavoritesCommands::Add {
                    user_id,
                    identity,
                    domain,
                } => cli::cmd_favorites_add(&state, &user_id, domain, &identity).await,
                FavoritesCommands::Remove {
                    user_id,
                    identity,
                    domain,
                } => cli::cmd_favorites_remove(&state, &user_id, domain, &identity).await,
            }
        }

        Commands::Status => {
            let state = SharedState::new(config).await?;
            cli::cmd_status(&state).await
        }
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn install_metrics_recorder(
    config: &Config,
) -> anyhow::Result<Option<metrics_exporter_prometheus::PrometheusHandle>> {
    if !config.observability.metrics_enabled {
        return Ok(None);
    }

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");
    Ok(Some(handle))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Larder v{} starting...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = install_metrics_recorder(&config)?;
    let port = config.server.port;

    let shared = Arc::new(SharedState::new(config).await?);
    let api_state = api::create_app_state(Arc::clone(&shared), prometheus_handle);

    let app = api::router(api_state).await;
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!("Error listening for shutdown: {}", e),
        }
    });

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
    }

    shared.search_service.settle().await;
    info!("Server stopped");

    Ok(())
}
