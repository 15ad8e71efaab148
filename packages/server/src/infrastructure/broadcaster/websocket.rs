//! WebSocket を使った Broadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - チャンネル（ブロードキャストグループ）ごとの所属接続を管理
//! - イベントを JSON にしてグループ内の接続へ送信
//!
//! ## 設計ノート
//!
//! WebSocket の受付と `UnboundedSender` の生成は UI 層
//! （`ui/handler/websocket.rs`）で行われます。この実装は受け取った sender を
//! 使ってメッセージを送るだけで、ソケット自体には触れません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastError, Broadcaster, ChannelName, ConnectionId, OutboundEvent, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

#[derive(Default)]
struct Registry {
    /// Key: 接続 ID, Value: 送信キュー
    connections: HashMap<ConnectionId, PusherChannel>,
    /// Key: チャンネル名, Value: 所属する接続（参加順）
    groups: HashMap<ChannelName, Vec<ConnectionId>>,
}

impl Registry {
    fn leave(&mut self, connection_id: &ConnectionId, channel: &ChannelName) {
        if let Some(members) = self.groups.get_mut(channel) {
            members.retain(|id| id != connection_id);
            if members.is_empty() {
                self.groups.remove(channel);
            }
        }
    }
}

/// WebSocket を使った Broadcaster 実装
#[derive(Default)]
pub struct WebSocketBroadcaster {
    registry: Mutex<Registry>,
}

impl WebSocketBroadcaster {
    /// 新しい WebSocketBroadcaster を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// チャンネルのグループに所属する接続 ID（参加順）
    pub async fn group_members(&self, channel: &ChannelName) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.groups.get(channel).cloned().unwrap_or_default()
    }

    /// 登録中の接続数
    pub async fn count_connections(&self) -> usize {
        self.registry.lock().await.connections.len()
    }

    async fn emit(
        &self,
        channel: &ChannelName,
        event: &OutboundEvent,
        excluded: Option<&ConnectionId>,
    ) -> Result<(), BroadcastError> {
        let server_event: ServerEvent = event.clone().into();
        let content = serde_json::to_string(&server_event)
            .map_err(|e| BroadcastError::Serialization(e.to_string()))?;

        let registry = self.registry.lock().await;
        let Some(members) = registry.groups.get(channel) else {
            tracing::debug!("Channel '{}' has no members, nothing to broadcast", channel);
            return Ok(());
        };

        for target in members.iter().filter(|id| Some(*id) != excluded) {
            match registry.connections.get(target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push event to connection '{}': {}", target, e);
                    } else {
                        tracing::debug!("Broadcasted event to connection '{}'", target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        tracing::debug!("Connection '{}' registered to Broadcaster", connection_id);
        registry.connections.insert(connection_id, sender);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.connections.remove(connection_id);
        let channels: Vec<ChannelName> = registry.groups.keys().cloned().collect();
        for channel in channels {
            registry.leave(connection_id, &channel);
        }
        tracing::debug!("Connection '{}' unregistered from Broadcaster", connection_id);
    }

    async fn subscribe(&self, connection_id: &ConnectionId, channel: &ChannelName) {
        let mut registry = self.registry.lock().await;
        let members = registry.groups.entry(channel.clone()).or_default();
        if !members.contains(connection_id) {
            members.push(connection_id.clone());
        }
    }

    async fn unsubscribe(&self, connection_id: &ConnectionId, channel: &ChannelName) {
        let mut registry = self.registry.lock().await;
        registry.leave(connection_id, channel);
    }

    async fn emit_to_channel(
        &self,
        channel: &ChannelName,
        event: &OutboundEvent,
    ) -> Result<(), BroadcastError> {
        self.emit(channel, event, None).await
    }

    async fn emit_to_channel_except(
        &self,
        channel: &ChannelName,
        event: &OutboundEvent,
        excluded: &ConnectionId,
    ) -> Result<(), BroadcastError> {
        self.emit(channel, event, Some(excluded)).await
    }
}
