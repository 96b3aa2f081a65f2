//! Query command implementation

use crate::bot::ConversationHandler;
use crate::cli::{output, QueryArgs};
use crate::config::CostBotConfig;
use std::sync::Arc;

/// Run the full question pipeline once and render the answer
pub async fn handle_query(args: &QueryArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = super::serve::load_layered_config(&args.config)?;
    config.validate_endpoints()?;

    let handler = build_handler(&config)?.with_today(args.today);

    let report = handler.answer(&args.question).await?;

    if args.json {
        Ok(output::format_report_json(&report)?)
    } else {
        Ok(output::format_report_table(&report))
    }
}

fn build_handler(config: &CostBotConfig) -> Result<ConversationHandler, Box<dyn std::error::Error>> {
    let client = Arc::new(reqwest::Client::new());
    Ok(ConversationHandler::from_config(config, client)?)
}
