//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Error body, e.g. `{"error": "Channel not found"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}

/// Health check body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
