//! Language-model backed query interpretation.

use super::{CostQuery, Granularity, QueryInterpretationError};
use crate::llm::{ChatMessage, LanguageModel};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const INSTRUCTION: &str = r#"You translate questions about Azure subscription costs into a JSON query.
Reply with exactly one JSON object and nothing else, using this shape:
{"start_date": "YYYY-MM-DD", "end_date": "YYYY-MM-DD", "granularity": "Daily" | "Monthly", "resource_groups": ["name", ...]}
Rules:
- start_date must not be after end_date.
- Use "Monthly" when the user asks for a per-month breakdown or a range longer than two months, otherwise "Daily".
- resource_groups lists only resource groups the user names explicitly; use [] when none are named.
- Resolve relative periods ("last month", "this week") against today's date.
- If the message is not a question about costs, reply {"error": "<one short sentence>"}."#;

/// Build the system instruction, anchored to `today` so relative periods resolve.
pub fn system_instruction(today: NaiveDate) -> String {
    format!("{}\nToday's date is {}.", INSTRUCTION, today.format("%Y-%m-%d"))
}

/// Shape the model is asked to produce.
#[derive(Debug, Deserialize)]
struct QueryReply {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    granularity: Option<String>,
    #[serde(default)]
    resource_groups: Option<Vec<String>>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse the model's reply into a validated [`CostQuery`].
///
/// Tolerates prose or Markdown code fences around the JSON object by reading
/// from the first `{` to the last `}`. A missing granularity defaults to Daily;
/// a missing `resource_groups` means no filter.
pub fn parse_query_reply(content: &str) -> Result<CostQuery, QueryInterpretationError> {
    let json = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(QueryInterpretationError::Unparseable(
                "no JSON object in reply".to_string(),
            ))
        }
    };

    let reply: QueryReply = serde_json::from_str(json)
        .map_err(|e| QueryInterpretationError::Unparseable(e.to_string()))?;

    if let Some(reason) = reply.error {
        return Err(QueryInterpretationError::NotACostQuestion(reason));
    }

    let start_date = parse_date("start_date", reply.start_date)?;
    let end_date = parse_date("end_date", reply.end_date)?;

    let granularity = match reply.granularity {
        Some(g) => g
            .parse::<Granularity>()
            .map_err(|_| QueryInterpretationError::UnsupportedGranularity(g))?,
        None => Granularity::Daily,
    };

    let query = CostQuery::new(
        start_date,
        end_date,
        granularity,
        reply.resource_groups.unwrap_or_default(),
    )?;
    Ok(query)
}

fn parse_date(
    field: &'static str,
    value: Option<String>,
) -> Result<NaiveDate, QueryInterpretationError> {
    let value = value.ok_or_else(|| {
        QueryInterpretationError::Unparseable(format!("missing field `{}`", field))
    })?;
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| QueryInterpretationError::InvalidDate { field, value })
}

/// Turns free-text chat messages into cost queries via the language model.
pub struct QueryInterpreter {
    model: Arc<dyn LanguageModel>,
    system_prompt: Option<String>,
}

impl QueryInterpreter {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            system_prompt: None,
        }
    }

    /// Replace the built-in instruction. Today's date is still appended.
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    fn instruction(&self, today: NaiveDate) -> String {
        match &self.system_prompt {
            Some(prompt) => format!("{}\nToday's date is {}.", prompt, today.format("%Y-%m-%d")),
            None => system_instruction(today),
        }
    }

    /// Ask the model to restate `text` as a query and validate its answer.
    pub async fn interpret(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<CostQuery, QueryInterpretationError> {
        let messages = vec![
            ChatMessage::system(self.instruction(today)),
            ChatMessage::user(text),
        ];

        let reply = self.model.complete(messages).await?;
        debug!(model = %self.model.name(), reply_len = reply.len(), "Query reply received");

        parse_query_reply(&reply)
    }
}
