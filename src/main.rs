// zendesk-bulk - Bulk operations for the Zendesk REST API
// Copyright (c) 2025 zendesk-bulk Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use zendesk_bulk::cli::{Cli, Commands};
use zendesk_bulk::config::load_logging_config;
use zendesk_bulk::core::batch::Resource;
use zendesk_bulk::domain::BulkError;
use zendesk_bulk::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let logging_config = load_logging_config(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| logging_config.level.clone());

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(if e.is_configuration() { 2 } else { 5 });
        }
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "zendesk-bulk");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    };

    // Flush file logs before exiting
    drop(_guard);
    process::exit(exit_code);
}

/// 2 for configuration errors, 5 for anything else
fn exit_code_for(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<BulkError>() {
        Some(e) if e.is_configuration() => 2,
        _ => 5,
    }
}

async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Tickets(args) => args.execute(&cli.config, Resource::Tickets, None).await,
        Commands::Users(args) => args.execute(&cli.config, Resource::Users, None).await,
        Commands::Articles(args) => args.execute(&cli.config, Resource::Articles, None).await,
        Commands::Posts(args) => args.execute(&cli.config).await,
        Commands::Redirects(args) => args.execute(&cli.config).await,
        Commands::ExportTickets(args) => args.execute(&cli.config).await,
        Commands::ExportPosts(args) => args.execute(&cli.config).await,
        Commands::Search(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
