//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装（インメモリストア、
//! WebSocket 配信）と、通信用の DTO を提供します。

pub mod broadcaster;
pub mod dto;
pub mod repository;
