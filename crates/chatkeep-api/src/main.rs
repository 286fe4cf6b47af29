//! chatkeep REST API entry point.
//!
//! Binary name: `chatkeep`
//!
//! Parses CLI arguments, initializes tracing, the database and services, then
//! serves the REST API until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use chatkeep_infra::config::{load_app_config, resolve_data_dir};
use chatkeep_observe::tracing_setup::{init_tracing, shutdown_tracing};
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatkeep", &mut std::io::stdout());
        return Ok(());
    }

    let filter = cli.log_filter();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
            otel,
        } => {
            init_tracing(filter, otel)
                .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

            let data_dir = resolve_data_dir();
            tokio::fs::create_dir_all(&data_dir).await?;

            let mut config = load_app_config(&data_dir).await;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(url) = database_url {
                config.database.url = Some(url);
            }

            let state = AppState::init(&config, &data_dir).await?;
            let pool = state.db_pool.clone();

            let addr = format!("{}:{}", config.host, config.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(app = %config.app_name, %addr, "Server listening");

            println!(
                "  {} {} listening on {}",
                console::style("⚡").bold(),
                console::style(&config.app_name).bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            pool.close().await;
            shutdown_tracing();
            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// A signal source that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
