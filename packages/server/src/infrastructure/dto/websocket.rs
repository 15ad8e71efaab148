//! WebSocket event frames.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Inbound events sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// `join {username, channel}`
    Join { username: String, channel: String },
    /// `message {text}`
    Message { text: String },
    /// `switchChannel "<name>"`
    SwitchChannel(String),
}

/// Outbound events delivered to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    Message(ChatMessageDto),
    UserList(Vec<UserDto>),
}

/// Chat message payload. System notices carry no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    pub text: String,
    /// ISO-8601 (UTC)
    pub timestamp: String,
}

/// User list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub username: String,
    pub channel: String,
}
