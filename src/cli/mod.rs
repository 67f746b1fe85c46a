//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for zendesk-bulk using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// zendesk-bulk - bulk operations and exports against the Zendesk API
#[derive(Parser, Debug)]
#[command(name = "zendesk-bulk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "zendesk-bulk.toml", env = "ZENDESK_BULK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ZENDESK_BULK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Soft-delete, permanently delete, restore or show tickets
    Tickets(commands::bulk::BulkArgs),

    /// Soft-delete users
    Users(commands::bulk::BulkArgs),

    /// Archive Help Center articles
    Articles(commands::bulk::BulkArgs),

    /// Move community posts to another topic
    Posts(commands::bulk::PostsArgs),

    /// Create Guide redirect rules from a YAML file
    Redirects(commands::redirects::RedirectsArgs),

    /// Export tickets of one organization carrying a tag
    ExportTickets(commands::export::ExportTicketsArgs),

    /// Export every post of a community topic
    ExportPosts(commands::export::ExportPostsArgs),

    /// Search and print matching ids
    Search(commands::search::SearchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_tickets() {
        let cli = Cli::parse_from(["zendesk-bulk", "tickets", "restore", "1,2,3"]);
        assert_eq!(cli.config, "zendesk-bulk.toml");
        match cli.command {
            Commands::Tickets(args) => {
                assert_eq!(args.operation, "restore");
                assert_eq!(args.ids, "1,2,3");
                assert_eq!(args.batch_size, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_posts_patch() {
        let cli = Cli::parse_from([
            "zendesk-bulk",
            "posts",
            "patch",
            "--topic-id",
            "42",
            "7,8",
        ]);
        match cli.command {
            Commands::Posts(args) => {
                assert_eq!(args.topic_id.as_deref(), Some("42"));
                assert_eq!(args.bulk.operation, "patch");
                assert_eq!(args.bulk.ids, "7,8");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_batch_size() {
        let cli = Cli::parse_from([
            "zendesk-bulk",
            "users",
            "soft-delete",
            "1,2",
            "--batch-size",
            "10",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Users(commands::bulk::BulkArgs {
                batch_size: Some(10),
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parse_export_tickets() {
        let cli = Cli::parse_from([
            "zendesk-bulk",
            "--config",
            "custom.toml",
            "export-tickets",
            "1700000000",
            "vip",
            "42",
        ]);
        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::ExportTickets(args) => {
                assert_eq!(args.start_time, "1700000000");
                assert_eq!(args.tag, "vip");
                assert_eq!(args.organization_id, "42");
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["zendesk-bulk", "--log-level", "debug", "search", "type:ticket"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_operational_commands() {
        let cli = Cli::parse_from(["zendesk-bulk", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));

        let cli = Cli::parse_from(["zendesk-bulk", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));

        let cli = Cli::parse_from(["zendesk-bulk", "redirects", "redirects.yml"]);
        assert!(matches!(cli.command, Commands::Redirects(_)));
    }
}
