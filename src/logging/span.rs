//! Per-turn request IDs and tracing spans.

use crate::bot::Activity;
use tracing::{info_span, Span};
use uuid::Uuid;

/// Generate a new request ID using UUID v4
///
/// # Examples
///
/// ```
/// use costbot::logging::generate_request_id;
///
/// let request_id = generate_request_id();
/// assert_eq!(request_id.len(), 36);
/// ```
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one inbound activity, from receipt to the last reply.
///
/// Everything logged while the turn is processed (model call, billing query,
/// reply delivery) carries the request ID and conversation.
pub fn turn_span(request_id: &str, activity: &Activity) -> Span {
    info_span!(
        "turn",
        request_id = %request_id,
        activity_type = %activity.activity_type,
        channel = activity.channel_id.as_deref().unwrap_or("-"),
        conversation = activity.conversation_id().unwrap_or("-"),
    )
}
