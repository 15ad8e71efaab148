//! Conversion logic between domain entities and DTOs.

use chatrelay_shared::time::timestamp_to_utc_iso8601;

use crate::domain::{ChatMessage, OutboundEvent, UserPresence};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id.map(|id| id.into_string()),
            username: model.username.into_string(),
            text: model.text.into_string(),
            timestamp: timestamp_to_utc_iso8601(model.timestamp.value()),
        }
    }
}

impl From<UserPresence> for dto::UserDto {
    fn from(model: UserPresence) -> Self {
        Self {
            username: model.username.into_string(),
            channel: model.channel.into_string(),
        }
    }
}

impl From<OutboundEvent> for dto::ServerEvent {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::Message(message) => Self::Message(message.into()),
            OutboundEvent::UserList(users) => {
                Self::UserList(users.into_iter().map(Into::into).collect())
            }
        }
    }
}
