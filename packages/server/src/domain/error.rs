//! ドメイン層のエラー定義

use thiserror::Error;

/// 配信（Broadcaster）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    /// イベントの JSON 化に失敗
    #[error("Failed to serialize event: {0}")]
    Serialization(String),
}
