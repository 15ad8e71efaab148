//! UseCase 層
//!
//! - `session_handler`: 接続ごとのプロトコル処理（join / message / switchChannel / disconnect）
//! - `get_channels`: チャンネル一覧の取得
//! - `get_channel_messages`: チャンネルのメッセージ履歴の取得

pub mod error;
pub mod get_channel_messages;
pub mod get_channels;
pub mod session_handler;

pub use error::GetChannelMessagesError;
pub use get_channel_messages::GetChannelMessagesUseCase;
pub use get_channels::GetChannelsUseCase;
pub use session_handler::SessionHandler;
