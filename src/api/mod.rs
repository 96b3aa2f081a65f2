//! # Chat Transport Endpoint
//!
//! HTTP surface the chat channel posts activities to.
//!
//! ## Endpoints
//!
//! - `POST /api/messages` - Bot Framework activity intake
//! - `GET /health` - Liveness with uptime and version
//!
//! ## Example
//!
//! ```no_run
//! use costbot::api::{create_router, AppState};
//! use costbot::config::CostBotConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(CostBotConfig::load(None)?.with_env_overrides());
//! let state = Arc::new(AppState::from_config(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Delivery
//!
//! Activities with `deliveryMode: "expectReplies"` get their replies in the
//! response body. All others are answered with an empty 200 after every reply
//! has been posted back through the [`ReplySender`].

mod error;
mod health;
mod messages;
pub mod types;

pub use error::ApiError;
pub use types::*;

use crate::bot::{ConnectorClient, ConversationHandler, ReplySender};
use crate::config::{ConfigError, CostBotConfig};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum activity body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<CostBotConfig>,
    pub handler: Arc<ConversationHandler>,
    pub sender: Arc<dyn ReplySender>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: Arc<CostBotConfig>,
        handler: Arc<ConversationHandler>,
        sender: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            config,
            handler,
            sender,
            start_time: Instant::now(),
        }
    }

    /// Build the production wiring: one pooled HTTP client shared by the
    /// language model, the cost-management API, and reply delivery.
    pub fn from_config(config: Arc<CostBotConfig>) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ConfigError::invalid("server", format!("failed to create HTTP client: {}", e)))?;
        let client = Arc::new(client);

        let handler = ConversationHandler::from_config(&config, Arc::clone(&client))?;
        let sender = ConnectorClient::new(
            config.bot.reply_token(),
            Duration::from_secs(config.bot.timeout_seconds),
            client,
        );

        Ok(Self::new(config, Arc::new(handler), Arc::new(sender)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.request_timeout_seconds)
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/messages", post(messages::handle))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
