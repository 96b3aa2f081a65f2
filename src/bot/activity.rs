//! Bot Framework activity payloads.
//!
//! Only the fields the bot reads or writes are modelled; unknown fields are
//! ignored on input.

use serde::{Deserialize, Serialize};

pub const MESSAGE: &str = "message";
pub const CONVERSATION_UPDATE: &str = "conversationUpdate";
pub const EXPECT_REPLIES: &str = "expectReplies";

/// A user, bot, or channel participant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// One inbound or outbound chat-transport activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<String>,
}

impl Activity {
    pub fn is_message(&self) -> bool {
        self.activity_type == MESSAGE
    }

    pub fn is_conversation_update(&self) -> bool {
        self.activity_type == CONVERSATION_UPDATE
    }

    /// Whether the caller wants replies in the HTTP response body.
    pub fn expects_replies(&self) -> bool {
        self.delivery_mode.as_deref() == Some(EXPECT_REPLIES)
    }

    /// Trimmed message text, `None` when absent or blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation.as_ref().map(|c| c.id.as_str())
    }

    /// Build a Markdown text reply addressed back into this activity's conversation.
    pub fn reply_text(&self, text: impl Into<String>) -> Activity {
        Activity {
            activity_type: MESSAGE.to_string(),
            id: None,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            service_url: self.service_url.clone(),
            channel_id: self.channel_id.clone(),
            from: self.recipient.clone(),
            conversation: self.conversation.clone(),
            recipient: self.from.clone(),
            text: Some(text.into()),
            text_format: Some("markdown".to_string()),
            members_added: Vec::new(),
            reply_to_id: self.id.clone(),
            delivery_mode: None,
        }
    }

    /// Participants added by this update, excluding the bot itself.
    pub fn members_added_except_bot(&self) -> impl Iterator<Item = &ChannelAccount> {
        let bot_id = self.recipient.as_ref().map(|r| r.id.as_str());
        self.members_added
            .iter()
            .filter(move |member| Some(member.id.as_str()) != bot_id)
    }
}
