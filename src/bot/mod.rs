//! Conversation handling for the chat transport.
//!
//! [`ConversationHandler`] turns inbound [`Activity`] values into replies;
//! a [`ReplySender`] delivers them when the channel does not expect them in
//! the HTTP response.

pub mod activity;
pub mod connector;
pub mod handler;

pub use activity::{Activity, ChannelAccount, ConversationAccount};
pub use connector::{ConnectorClient, DeliveryError, ReplySender};
pub use handler::{error_reply, ConversationHandler, CostReport, TurnError};
