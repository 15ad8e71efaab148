//! Channel-based chat relay library.
//!
//! Clients join named channels over WebSocket, exchange text messages and
//! observe channel membership changes. The server keeps a bounded recent
//! history per channel and exposes it over a small read-only HTTP API.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
