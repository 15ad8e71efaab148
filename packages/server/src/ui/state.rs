//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetChannelMessagesUseCase, GetChannelsUseCase, SessionHandler};

/// Shared application state
pub struct AppState {
    /// SessionHandler（接続ごとのセッション処理）
    pub session_handler: Arc<SessionHandler>,
    /// GetChannelsUseCase（チャンネル一覧取得のユースケース）
    pub get_channels_usecase: Arc<GetChannelsUseCase>,
    /// GetChannelMessagesUseCase（メッセージ履歴取得のユースケース）
    pub get_channel_messages_usecase: Arc<GetChannelMessagesUseCase>,
}
