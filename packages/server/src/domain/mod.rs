//! ドメイン層
//!
//! チャンネル、セッション、メッセージといったチャットリレーの中核モデルと、
//! 外部（ストア・配信）に対するインターフェースを定義します。

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

#[cfg(test)]
pub use broadcaster::MockBroadcaster;
pub use broadcaster::{Broadcaster, OutboundEvent, PusherChannel};
pub use entity::{
    Channel, ChatMessage, MAX_CHANNEL_HISTORY, SYSTEM_USERNAME, UserPresence, UserSession,
};
pub use error::BroadcastError;
pub use repository::{ChannelRepository, PresenceRepository};
pub use value_object::{
    ChannelName, ConnectionId, ConnectionIdFactory, MessageId, MessageText, Timestamp, Username,
};
