//! Activity intake endpoint handler.

use crate::api::{ApiError, AppState, ExpectedReplies};
use crate::bot::handler::ERROR_PREFIX;
use crate::bot::Activity;
use crate::logging::{generate_request_id, turn_span};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

/// POST /api/messages - Answer one inbound activity.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(activity): Json<Activity>,
) -> Result<Response, ApiError> {
    if state.config.bot.requires_auth() && !has_bearer_token(&headers) {
        warn!("Rejected activity without bearer token");
        return Err(ApiError::unauthorized("Missing bearer token"));
    }

    let request_id = generate_request_id();
    let span = turn_span(&request_id, &activity);

    async move {
        let start_time = std::time::Instant::now();
        let replies = replies_within_deadline(&state, &activity).await;

        let response = if activity.expects_replies() {
            Json(ExpectedReplies { activities: replies }).into_response()
        } else {
            for reply in &replies {
                if let Err(e) = state.sender.send(reply).await {
                    warn!(error = %e, "Reply delivery failed");
                    return Err(ApiError::bad_gateway(&e.to_string()));
                }
            }
            StatusCode::OK.into_response()
        };

        info!(
            latency_ms = start_time.elapsed().as_millis() as u64,
            "Activity handled"
        );
        Ok(response)
    }
    .instrument(span)
    .await
}

/// Run the turn under the server's request timeout. A message that runs out
/// of time still gets its single error reply.
async fn replies_within_deadline(state: &AppState, activity: &Activity) -> Vec<Activity> {
    let timeout = state.request_timeout();
    match tokio::time::timeout(timeout, state.handler.on_turn(activity)).await {
        Ok(replies) => replies,
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "Turn timed out");
            if activity.is_message() {
                vec![activity.reply_text(format!(
                    "{} the request timed out after {}s",
                    ERROR_PREFIX,
                    timeout.as_secs()
                ))]
            } else {
                Vec::new()
            }
        }
    }
}

fn has_bearer_token(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .is_some_and(|(scheme, token)| {
            scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty()
        })
}
