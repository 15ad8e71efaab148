//! UseCase 層のエラー定義

use thiserror::Error;

/// メッセージ履歴取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetChannelMessagesError {
    /// チャンネルが存在しない
    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),
}
