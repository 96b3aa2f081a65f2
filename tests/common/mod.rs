//! Shared test utilities for costbot integration tests.
//!
//! One wiremock server stands in for the language model, the cost-management
//! API, and the channel connector; each is mounted on its own path.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use chrono::NaiveDate;
use costbot::api::{create_router, AppState};
use costbot::billing::{CostManagementClient, StaticTokenProvider};
use costbot::bot::{ConnectorClient, ConversationHandler};
use costbot::config::{CostBotConfig, LlmProvider};
use costbot::llm::OpenAIClient;
use costbot::query::QueryInterpreter;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000001";
pub const COST_QUERY_PATH: &str =
    "/subscriptions/00000000-0000-0000-0000-000000000001/providers/Microsoft.CostManagement/query";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Pinned "today" so relative periods are deterministic.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
}

/// Config pointing every upstream at `server`.
pub fn test_config(server: &MockServer) -> CostBotConfig {
    let mut config = CostBotConfig::default();
    config.llm.provider = LlmProvider::OpenAI;
    config.llm.endpoint = server.uri();
    config.llm.deployment = "gpt-4o".to_string();
    config.billing.management_url = server.uri();
    config.billing.subscription_id = SUBSCRIPTION_ID.to_string();
    config.server.request_timeout_seconds = 10;
    config
}

/// Application state wired to `config` with static credentials.
pub fn make_state(config: CostBotConfig) -> Arc<AppState> {
    let client = Arc::new(reqwest::Client::new());
    let model = OpenAIClient::new(&config.llm, "sk-test".to_string(), Arc::clone(&client));
    let costs = CostManagementClient::new(
        &config.billing,
        Arc::new(StaticTokenProvider("arm-token".to_string())),
        Arc::clone(&client),
    );
    let handler = ConversationHandler::new(QueryInterpreter::new(Arc::new(model)), Arc::new(costs))
        .with_welcome_message(config.bot.welcome_message.clone())
        .with_today(Some(today()));
    let sender = ConnectorClient::new(None, Duration::from_secs(5), client);

    Arc::new(AppState::new(
        Arc::new(config),
        Arc::new(handler),
        Arc::new(sender),
    ))
}

pub fn make_app(server: &MockServer) -> axum::Router {
    create_router(make_state(test_config(server)))
}

/// Mount a chat completion whose assistant content is `content`.
pub async fn mount_llm_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })))
        .mount(server)
        .await;
}

/// Mount a cost query answering with `rows` (`[cost, date, currency]`).
pub async fn mount_cost_rows(server: &MockServer, rows: Value) {
    Mock::given(method("POST"))
        .and(path(COST_QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "query-1",
            "properties": {
                "nextLink": null,
                "columns": [
                    {"name": "PreTaxCost", "type": "Number"},
                    {"name": "UsageDate", "type": "Number"},
                    {"name": "Currency", "type": "String"}
                ],
                "rows": rows
            }
        })))
        .mount(server)
        .await;
}

/// Mount the connector reply endpoint, answering 200 for every reply.
pub async fn mount_connector(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v3/conversations/.+/activities.*$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "reply-1"})))
        .mount(server)
        .await;
}

/// Inbound message activity. `expect_replies` selects in-body delivery.
pub fn message_activity(server: &MockServer, text: &str, expect_replies: bool) -> Value {
    let mut activity = json!({
        "type": "message",
        "id": "act-1",
        "channelId": "emulator",
        "serviceUrl": server.uri(),
        "from": {"id": "user-1", "name": "Alex"},
        "recipient": {"id": "bot-1", "name": "costbot"},
        "conversation": {"id": "conv-1"},
        "text": text
    });
    if expect_replies {
        activity["deliveryMode"] = json!("expectReplies");
    }
    activity
}

pub fn post_activity(activity: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header("content-type", "application/json")
        .body(Body::from(activity.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Text of every reply in an `expectReplies` body.
pub fn reply_texts(body: &Value) -> Vec<String> {
    body["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["text"].as_str().unwrap_or_default().to_string())
        .collect()
}
