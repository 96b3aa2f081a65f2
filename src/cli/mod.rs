//! CLI module for costbot
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the chat endpoint
//! - `query` - Answer one cost question in the terminal
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! costbot serve
//!
//! # Ask a question without a chat channel
//! costbot query "What did we spend per month this year?"
//!
//! # Generate shell completions
//! costbot completions bash > ~/.bash_completion.d/costbot
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod query;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// costbot - Azure subscription cost chatbot
#[derive(Parser, Debug)]
#[command(
    name = "costbot",
    version,
    about = "Chat bot answering natural-language questions about Azure subscription costs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat endpoint
    Serve(ServeArgs),
    /// Answer one cost question and print the result
    Query(QueryArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "costbot.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "COSTBOT_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "COSTBOT_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COSTBOT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Question, e.g. "daily costs for rg-web last week"
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Resolve relative periods against this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Path to configuration file
    #[arg(short, long, default_value = "costbot.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "costbot.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["costbot", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("costbot.toml"));
                assert!(args.log_level.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port_and_host() {
        let cli = Cli::try_parse_from(["costbot", "serve", "-p", "3978", "-H", "127.0.0.1"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(3978));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_query() {
        let cli = Cli::try_parse_from([
            "costbot",
            "query",
            "costs last month",
            "--json",
            "--today",
            "2024-03-15",
        ])
        .unwrap();
        match cli.command {
            Commands::Query(args) => {
                assert_eq!(args.question, "costs last month");
                assert!(args.json);
                assert_eq!(args.today, NaiveDate::from_ymd_opt(2024, 3, 15));
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn test_cli_parse_query_rejects_bad_date() {
        assert!(Cli::try_parse_from(["costbot", "query", "q", "--today", "yesterday"]).is_err());
    }

    #[test]
    fn test_cli_parse_query_requires_question() {
        assert!(Cli::try_parse_from(["costbot", "query"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["costbot", "config", "init", "-o", "x.toml", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert_eq!(args.output, PathBuf::from("x.toml"));
                assert!(args.force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
