//! Entity 定義

use std::collections::VecDeque;

use super::value_object::{ChannelName, ConnectionId, MessageId, MessageText, Timestamp, Username};

/// チャンネルごとに保持するメッセージ履歴の上限
pub const MAX_CHANNEL_HISTORY: usize = 100;

/// システム通知の送信者名
pub const SYSTEM_USERNAME: &str = "System";

/// チャットメッセージ
///
/// `id` を持たないメッセージはシステム通知（参加・退出）で、履歴には保存されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Option<MessageId>,
    pub username: Username,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    /// ユーザーが送信したメッセージを作成（ID はタイムスタンプから導出）
    pub fn new(username: Username, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            id: Some(MessageId::from_timestamp(timestamp)),
            username,
            text,
            timestamp,
        }
    }

    /// `{username} has joined the channel` のシステム通知
    pub fn joined_notice(username: &Username, timestamp: Timestamp) -> Self {
        Self::system(format!("{} has joined the channel", username), timestamp)
    }

    /// `{username} has left the channel` のシステム通知
    pub fn left_notice(username: &Username, timestamp: Timestamp) -> Self {
        Self::system(format!("{} has left the channel", username), timestamp)
    }

    fn system(text: String, timestamp: Timestamp) -> Self {
        Self {
            id: None,
            username: Username::new(SYSTEM_USERNAME.to_string()),
            text: MessageText::new(text),
            timestamp,
        }
    }

    pub fn is_system(&self) -> bool {
        self.id.is_none()
    }
}

/// チャンネル（名前と直近のメッセージ履歴）
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: ChannelName,
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Channel {
    pub fn new(name: ChannelName) -> Self {
        Self::with_capacity(name, MAX_CHANNEL_HISTORY)
    }

    pub fn with_capacity(name: ChannelName, capacity: usize) -> Self {
        Self {
            name,
            messages: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// メッセージを末尾に追加し、上限を超えた分を古い順に捨てる（FIFO）
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// 古い順のメッセージ履歴
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// 接続 1 つにつき 1 つのユーザーセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub channel: ChannelName,
}

impl UserSession {
    pub fn new(connection_id: ConnectionId, username: Username, channel: ChannelName) -> Self {
        Self {
            connection_id,
            username,
            channel,
        }
    }

    pub fn presence(&self) -> UserPresence {
        UserPresence {
            username: self.username.clone(),
            channel: self.channel.clone(),
        }
    }
}

/// ユーザーリストの要素 `{username, channel}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPresence {
    pub username: Username,
    pub channel: ChannelName,
}
