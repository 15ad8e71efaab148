//! Broadcaster trait 定義
//!
//! チャンネル（ブロードキャストグループ）単位でイベントを配信するための
//! インターフェース。グループへの参加・離脱はセッション状態の変更と同時に
//! SessionHandler から明示的に呼び出されます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{BroadcastError, ChannelName, ChatMessage, ConnectionId, UserPresence};

/// 接続ごとの送信キュー
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// クライアントへ送るイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// `message` イベント
    Message(ChatMessage),
    /// `userList` イベント
    UserList(Vec<UserPresence>),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// 接続の送信キューを登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信キューを登録解除（全グループからも外す）
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 接続をチャンネルのグループに参加させる
    async fn subscribe(&self, connection_id: &ConnectionId, channel: &ChannelName);

    /// 接続をチャンネルのグループから外す
    async fn unsubscribe(&self, connection_id: &ConnectionId, channel: &ChannelName);

    /// グループの全接続に配信
    async fn emit_to_channel(
        &self,
        channel: &ChannelName,
        event: &OutboundEvent,
    ) -> Result<(), BroadcastError>;

    /// グループの `excluded` 以外の全接続に配信
    async fn emit_to_channel_except(
        &self,
        channel: &ChannelName,
        event: &OutboundEvent,
        excluded: &ConnectionId,
    ) -> Result<(), BroadcastError>;
}
