//! `costbot config` subcommands

use crate::cli::ConfigInitArgs;
use crate::config::{ConfigError, CostBotConfig};
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../costbot.example.toml");

/// Parsed form of the bundled template.
fn template() -> Result<CostBotConfig, ConfigError> {
    toml::from_str(EXAMPLE_CONFIG).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Shell lines exporting the secrets `config` reads from the environment.
pub fn secret_exports(config: &CostBotConfig) -> Vec<String> {
    let mut vars = vec![
        config.llm.api_key_env.as_str(),
        config.billing.token_env.as_str(),
    ];
    if let Some(reply_token) = config.bot.token_env.as_deref() {
        vars.push(reply_token);
    }
    vars.into_iter()
        .map(|var| format!("export {}=...", var))
        .collect()
}

/// Write the example config to `args.output`, refusing to clobber an
/// existing file unless `--force` is given.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    let config = template()?;
    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Fill in [llm] endpoint and [billing] subscription_id, then:");
    for line in secret_exports(&config) {
        println!("    {}", line);
    }

    Ok(())
}
