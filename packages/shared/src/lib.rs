//! Shared utilities for the chat relay workspace.

pub mod logger;
pub mod time;
