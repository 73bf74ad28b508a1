// awp - Akamai configuration export toolset
// Copyright (c) 2025 awp Contributors
// Licensed under the MIT License

use awp::cli::commands::CommandContext;
use awp::cli::{Cli, Commands};
use awp::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli.effective_log_level(&config);
    let logging_guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        section = %config.credentials.section,
        "awp - Akamai configuration export toolset"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_signal().await;
        eprintln!("\n⚠️  Shutdown signal received, finishing current item...");
        let _ = shutdown_tx.send(true);
    });

    let ctx = CommandContext::new(config, cli.verbose, shutdown_rx);
    let exit_code = match execute_command(&cli, &ctx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file log first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Resolves once Ctrl+C or, on unix, SIGTERM arrives
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
                    }
                    _ = sigterm.recv() => {
                        tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                    }
                }
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler; Ctrl+C only");
            }
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown..."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, ctx: &CommandContext) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::SearchAsw(args) => args.execute(ctx).await,
        Commands::SearchGroup(args) => args.execute(ctx).await,
        Commands::ListProperties(args) => args.execute(ctx).await,
        Commands::DownloadProperty(args) => args.execute(ctx).await,
        Commands::DownloadProperties(args) => args.execute(ctx).await,
        Commands::ListNetworkLists(args) => args.execute(ctx).await,
        Commands::DownloadNetworkLists(args) => args.execute(ctx).await,
        Commands::ListClientLists(args) => args.execute(ctx).await,
        Commands::DownloadClientLists(args) => args.execute(ctx).await,
    }
}
