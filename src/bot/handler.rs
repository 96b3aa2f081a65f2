//! Per-activity conversation logic.

use super::Activity;
use crate::billing::{CostDataFetchError, CostManagementClient, CostSource, EnvTokenProvider};
use crate::config::{ConfigError, CostBotConfig};
use crate::llm::OpenAIClient;
use crate::logging::{preview_text, reply_outcome};
use crate::query::{CostQuery, QueryInterpretationError, QueryInterpreter};
use crate::series::{build_series, render_series, CostSeries, MalformedCostRowError};
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ERROR_PREFIX: &str = "An error occurred:";

pub const EMPTY_MESSAGE_PROMPT: &str =
    "Please ask a question about Azure costs, for example \"What did we spend last month?\"";

/// Any failure while answering a cost question.
#[derive(Error, Debug)]
pub enum TurnError {
    #[error(transparent)]
    QueryInterpretation(#[from] QueryInterpretationError),

    #[error(transparent)]
    CostDataFetch(#[from] CostDataFetchError),

    #[error(transparent)]
    MalformedCostRow(#[from] MalformedCostRowError),
}

impl TurnError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TurnError::QueryInterpretation(_) => "query_interpretation",
            TurnError::CostDataFetch(_) => "cost_data_fetch",
            TurnError::MalformedCostRow(_) => "malformed_cost_row",
        }
    }
}

/// A successfully answered question.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    pub query: CostQuery,
    pub series: CostSeries,
}

impl CostReport {
    /// Chat reply text: a one-line summary of the query, then the table.
    pub fn render(&self) -> String {
        format!("**{}**\n\n{}", self.query, render_series(&self.series))
    }
}

/// Chat text for a failed turn.
pub fn error_reply(err: &TurnError) -> String {
    format!("{} {}", ERROR_PREFIX, err)
}

/// Answers chat activities.
///
/// One message in, exactly one reply out, whatever fails along the way.
pub struct ConversationHandler {
    interpreter: QueryInterpreter,
    costs: Arc<dyn CostSource>,
    welcome_message: String,
    enable_content_logging: bool,
    today: Option<NaiveDate>,
}

impl ConversationHandler {
    pub fn new(interpreter: QueryInterpreter, costs: Arc<dyn CostSource>) -> Self {
        Self {
            interpreter,
            costs,
            welcome_message: crate::config::bot::DEFAULT_WELCOME_MESSAGE.to_string(),
            enable_content_logging: false,
            today: None,
        }
    }

    /// Wire the configured language model and cost-management client.
    ///
    /// Fails when the LLM API key is missing; the billing token is read
    /// per request.
    pub fn from_config(config: &CostBotConfig, client: Arc<Client>) -> Result<Self, ConfigError> {
        let model = OpenAIClient::from_config(&config.llm, Arc::clone(&client))?;
        let interpreter =
            QueryInterpreter::new(Arc::new(model)).with_system_prompt(config.llm.system_prompt.clone());

        let tokens = Arc::new(EnvTokenProvider::new(config.billing.token_env.clone()));
        let costs = CostManagementClient::new(&config.billing, tokens, client);

        Ok(Self::new(interpreter, Arc::new(costs))
            .with_welcome_message(config.bot.welcome_message.clone())
            .with_content_logging(config.logging.enable_content_logging))
    }

    pub fn with_welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = message.into();
        self
    }

    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.enable_content_logging = enabled;
        self
    }

    /// Pin the date relative periods are resolved against.
    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    pub fn welcome_message(&self) -> &str {
        &self.welcome_message
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Run interpretation, fetch, and series building for one question.
    pub async fn answer(&self, text: &str) -> Result<CostReport, TurnError> {
        let query = self.interpreter.interpret(text, self.today()).await?;
        info!(query = %query, "Interpreted cost query");

        let response = self.costs.query_costs(&query).await?;
        let rows = response.cost_rows()?;
        let series = build_series(&rows, query.granularity())?;
        debug!(rows = rows.len(), entries = series.len(), "Built cost series");

        Ok(CostReport { query, series })
    }

    /// Replies to send for `activity`, in order.
    pub async fn on_turn(&self, activity: &Activity) -> Vec<Activity> {
        if activity.is_message() {
            vec![self.on_message(activity).await]
        } else if activity.is_conversation_update() {
            self.on_members_added(activity)
        } else {
            debug!(activity_type = %activity.activity_type, "Ignoring activity");
            Vec::new()
        }
    }

    async fn on_message(&self, activity: &Activity) -> Activity {
        let Some(text) = activity.trimmed_text() else {
            return activity.reply_text(EMPTY_MESSAGE_PROMPT);
        };

        if let Some(preview) = preview_text(text, self.enable_content_logging) {
            info!(text = %preview, "Message received");
        }

        let result = self.answer(text).await;
        let (outcome, error_message) = reply_outcome(&result);
        match result {
            Ok(report) => {
                info!(outcome, entries = report.series.len(), "Replying with cost table");
                activity.reply_text(report.render())
            }
            Err(err) => {
                warn!(outcome, error = error_message.as_deref().unwrap_or(""), "Turn failed");
                activity.reply_text(error_reply(&err))
            }
        }
    }

    fn on_members_added(&self, activity: &Activity) -> Vec<Activity> {
        activity
            .members_added_except_bot()
            .map(|member| {
                debug!(member = %member.id, "Welcoming member");
                let mut reply = activity.reply_text(self.welcome_message.clone());
                reply.recipient = Some(member.clone());
                reply
            })
            .collect()
    }
}
