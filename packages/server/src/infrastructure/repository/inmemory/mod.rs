//! インメモリ Repository 実装
//!
//! プロセス終了とともに破棄されます（永続化なし）。

pub mod channel;
pub mod presence;

pub use channel::InMemoryChannelRepository;
pub use presence::InMemoryPresenceRepository;
