//! Repository trait 定義
//!
//! ドメイン層が必要とするストアのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChannelName, ChatMessage, ConnectionId, UserPresence, UserSession, Username};

/// ChannelStore: 固定のチャンネル集合と各チャンネルのメッセージ履歴
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// チャンネルが存在するか
    async fn exists(&self, name: &ChannelName) -> bool;

    /// 全チャンネル名（起動時の順序）
    async fn list_channel_names(&self) -> Vec<ChannelName>;

    /// メッセージ履歴（古い順）。存在しないチャンネルは `None`
    async fn get_history(&self, name: &ChannelName) -> Option<Vec<ChatMessage>>;

    /// メッセージを追加する。存在しないチャンネルへの追加は何もしない
    ///
    /// 保存した場合は `true` を返す。
    async fn append(&self, name: &ChannelName, message: ChatMessage) -> bool;
}

/// PresenceRegistry: 接続 ID → {ユーザー名, 現在のチャンネル}
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// セッションを作成または上書きする（ユーザー名の重複は許可）
    async fn join(&self, connection_id: ConnectionId, username: Username, channel: ChannelName);

    /// チャンネルを切り替える。セッションがなければ何もしない
    async fn switch_channel(&self, connection_id: &ConnectionId, channel: ChannelName);

    /// セッションを削除し、削除したセッションを返す
    async fn remove(&self, connection_id: &ConnectionId) -> Option<UserSession>;

    /// 指定チャンネルにいるユーザーの一覧
    async fn list_users(&self, channel: &ChannelName) -> Vec<UserPresence>;

    /// 接続 ID からセッションを取得
    async fn find(&self, connection_id: &ConnectionId) -> Option<UserSession>;
}
