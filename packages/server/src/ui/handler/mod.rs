//! Request handlers.

mod http;
mod websocket;

pub use http::{get_channel_messages, get_channels, health_check, liveness};
pub use websocket::websocket_handler;
