//! UseCase: 接続ごとのセッション処理
//!
//! ## 状態遷移
//!
//! ```text
//! Unjoined --join--> Joined(c) --switchChannel--> Joined(c') --disconnect--> Disconnected
//!                      |  ^
//!                      +--+ message / join（上書き）
//! ```
//!
//! セッションを持たない接続からの message / switchChannel / disconnect は
//! エラーを返さずに無視します。チャンネル名は検証しません（ChannelStore に
//! 存在しないチャンネルでも参加・配信はでき、履歴だけが保存されない）。
//!
//! ## 排他制御
//!
//! 各ハンドラは `dispatch` ロックを保持したまま最後まで実行されるため、
//! 同時に処理されるハンドラは常に 1 つです。PresenceRegistry・ChannelStore・
//! グループ所属の 3 つがハンドラの途中で他の接続から観測されることはありません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - join / send_message / switch_channel / disconnect の状態変更と配信先
//!
//! ### なぜこのテストが必要か
//! - 「送信者を除く」「送信者を含む」の配信ルールがイベントごとに異なる
//! - PresenceRegistry とグループ所属の整合性を保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人での join とメッセージ送受信、チャンネル切り替え、切断
//! - エッジケース：セッションなしでの操作、再 join、存在しないチャンネル、履歴上限

use std::sync::Arc;

use chatrelay_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastError, Broadcaster, ChannelName, ChannelRepository, ChatMessage, ConnectionId,
    MessageText, OutboundEvent, PresenceRepository, PusherChannel, Timestamp, Username,
};

/// セッション処理のユースケース
pub struct SessionHandler {
    /// PresenceRegistry（接続 → ユーザー・チャンネル）
    presence: Arc<dyn PresenceRepository>,
    /// ChannelStore（チャンネルとメッセージ履歴）
    channels: Arc<dyn ChannelRepository>,
    /// Broadcaster（グループ配信の抽象化）
    broadcaster: Arc<dyn Broadcaster>,
    /// メッセージの時刻と ID の生成元
    clock: Arc<dyn Clock>,
    /// ハンドラを 1 つずつ実行するためのロック
    dispatch: Mutex<()>,
}

impl SessionHandler {
    /// 新しい SessionHandler を作成
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        channels: Arc<dyn ChannelRepository>,
        broadcaster: Arc<dyn Broadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            channels,
            broadcaster,
            clock,
            dispatch: Mutex::new(()),
        }
    }

    /// 新しい接続の送信キューを登録する（Unjoined 状態）
    pub async fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let _guard = self.dispatch.lock().await;
        tracing::info!("Connection '{}' opened", connection_id);
        self.broadcaster
            .register_connection(connection_id, sender)
            .await;
    }

    /// `join {username, channel}`
    ///
    /// セッションを登録（既存なら上書き）してチャンネルのグループに参加し、
    /// 他の参加者に参加通知、参加者全員に最新のユーザー一覧を配信する。
    pub async fn join(&self, connection_id: &ConnectionId, username: Username, channel: ChannelName) {
        let _guard = self.dispatch.lock().await;

        // 再 join の場合は前のグループから外れる（所属グループは常に 1 つ）
        if let Some(previous) = self.presence.find(connection_id).await {
            self.broadcaster
                .unsubscribe(connection_id, &previous.channel)
                .await;
        }

        self.presence
            .join(connection_id.clone(), username.clone(), channel.clone())
            .await;
        self.broadcaster.subscribe(connection_id, &channel).await;
        tracing::info!(
            "'{}' ({}) joined channel '{}'",
            username,
            connection_id,
            channel
        );

        let notice = ChatMessage::joined_notice(&username, self.now());
        report(
            self.broadcaster
                .emit_to_channel_except(&channel, &OutboundEvent::Message(notice), connection_id)
                .await,
        );
        self.broadcast_user_list(&channel).await;
    }

    /// `message {text}`
    ///
    /// 現在のチャンネルの履歴に追加し、送信者を含む全員に配信する。
    pub async fn send_message(&self, connection_id: &ConnectionId, text: MessageText) {
        let _guard = self.dispatch.lock().await;

        let Some(session) = self.presence.find(connection_id).await else {
            tracing::debug!("Ignoring message from '{}' without session", connection_id);
            return;
        };

        let message = ChatMessage::new(session.username, text, self.now());
        if !self.channels.append(&session.channel, message.clone()).await {
            tracing::debug!(
                "Channel '{}' has no history, message broadcast only",
                session.channel
            );
        }
        report(
            self.broadcaster
                .emit_to_channel(&session.channel, &OutboundEvent::Message(message))
                .await,
        );
    }

    /// `switchChannel <name>`
    ///
    /// 旧チャンネルには何も通知しない。新チャンネルの他の参加者に参加通知、
    /// 新チャンネルの全員に最新のユーザー一覧を配信する。
    pub async fn switch_channel(&self, connection_id: &ConnectionId, channel: ChannelName) {
        let _guard = self.dispatch.lock().await;

        let Some(session) = self.presence.find(connection_id).await else {
            tracing::debug!(
                "Ignoring switchChannel from '{}' without session",
                connection_id
            );
            return;
        };

        self.broadcaster
            .unsubscribe(connection_id, &session.channel)
            .await;
        self.presence
            .switch_channel(connection_id, channel.clone())
            .await;
        self.broadcaster.subscribe(connection_id, &channel).await;
        tracing::info!(
            "'{}' ({}) switched from '{}' to '{}'",
            session.username,
            connection_id,
            session.channel,
            channel
        );

        let notice = ChatMessage::joined_notice(&session.username, self.now());
        report(
            self.broadcaster
                .emit_to_channel_except(&channel, &OutboundEvent::Message(notice), connection_id)
                .await,
        );
        self.broadcast_user_list(&channel).await;
    }

    /// トランスポートの切断
    ///
    /// セッションがあれば残りの参加者に退出通知と最新のユーザー一覧を配信する。
    /// セッションの有無にかかわらず送信キューは登録解除する。
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        let _guard = self.dispatch.lock().await;

        if let Some(session) = self.presence.find(connection_id).await {
            // 切断した接続はこの時点でグループから外れている
            self.broadcaster
                .unsubscribe(connection_id, &session.channel)
                .await;

            let notice = ChatMessage::left_notice(&session.username, self.now());
            report(
                self.broadcaster
                    .emit_to_channel(&session.channel, &OutboundEvent::Message(notice))
                    .await,
            );

            self.presence.remove(connection_id).await;
            tracing::info!(
                "'{}' ({}) left channel '{}'",
                session.username,
                connection_id,
                session.channel
            );
            self.broadcast_user_list(&session.channel).await;
        }

        self.broadcaster.unregister_connection(connection_id).await;
        tracing::info!("Connection '{}' closed", connection_id);
    }

    /// チャンネルの全員に最新のユーザー一覧を配信
    async fn broadcast_user_list(&self, channel: &ChannelName) {
        let users = self.presence.list_users(channel).await;
        report(
            self.broadcaster
                .emit_to_channel(channel, &OutboundEvent::UserList(users))
                .await,
        );
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}

/// 配信の失敗はログに残すだけで、クライアントには返さない
fn report(result: Result<(), BroadcastError>) {
    if let Err(e) = result {
        tracing::warn!("Broadcast failed: {}", e);
    }
}
