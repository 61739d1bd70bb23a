//! Helpdesk CLI and REST API entry point.
//!
//! Binary name: `helpdesk`
//!
//! Parses CLI arguments, loads configuration, initializes database and
//! services, then dispatches to the command handler or starts the server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use console::style;

use helpdesk_infra::config::{load_config, resolve_data_dir};
use helpdesk_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing, config or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "helpdesk", &mut std::io::stdout());
        return Ok(());
    }

    let enable_otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), enable_otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();
    let mut config = load_config(&data_dir, cli.config.as_deref()).await;

    let result = match cli.command {
        Commands::Serve { host, port, .. } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let state = AppState::init(&config, &data_dir).await?;
            serve(state, &config.server.host, config.server.port, cli.quiet).await
        }

        Commands::InitDb => {
            let state = AppState::init(&config, &data_dir).await?;
            state.db_pool.close().await;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "database_url": state.database_url, "initialized": true })
                );
            } else if !cli.quiet {
                println!();
                println!(
                    "  {} Database initialized at {}",
                    style("✓").green().bold(),
                    style(&state.database_url).cyan()
                );
                println!();
            }
            Ok(())
        }

        Commands::Stats { user, trends } => {
            let state = AppState::init(&config, &data_dir).await?;
            match (user, trends) {
                (Some(user_id), _) => cli::stats::user(&state, &user_id, cli.json).await,
                (None, Some(days)) => cli::stats::trends(&state, days, cli.json).await,
                (None, None) => cli::stats::summary(&state, cli.json).await,
            }
        }

        Commands::Ask { message, user_id } => {
            let state = AppState::init(&config, &data_dir).await?;
            cli::ask::ask(&state, &message, &user_id, cli.json).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    shutdown_tracing();
    result
}

async fn serve(state: AppState, host: &str, port: u16, quiet: bool) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let has_provider = state.chat_service.responder().has_provider();
    tracing::info!(%addr, has_provider, "helpdesk API listening");

    if !quiet {
        println!(
            "  {} Helpdesk API listening on {}",
            style("⚡").bold(),
            style(format!("http://{addr}")).cyan()
        );
        if !has_provider {
            println!(
                "  {}",
                style("No OPENAI_API_KEY set: replies come from the knowledge base").yellow()
            );
        }
        println!("  {}", style("Press Ctrl+C to stop").dim());
    }

    let db_pool = state.db_pool.clone();
    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    if !quiet {
        println!("\n  Server stopped.");
    }
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
