//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: real-time event frames
//! - `http`: HTTP API response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
