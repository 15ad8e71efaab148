//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::ChannelName,
    infrastructure::dto::{
        http::{ErrorResponseDto, HealthDto},
        websocket::ChatMessageDto,
    },
    ui::state::AppState,
    usecase::GetChannelMessagesError,
};

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    "Chat relay API is running"
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Get list of channel names
pub async fn get_channels(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let channels = state.get_channels_usecase.execute().await;
    Json(channels.into_iter().map(ChannelName::into_string).collect())
}

/// Get message history of a channel
pub async fn get_channel_messages(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> Result<Json<Vec<ChatMessageDto>>, (StatusCode, Json<ErrorResponseDto>)> {
    match state
        .get_channel_messages_usecase
        .execute(ChannelName::new(channel_id))
        .await
    {
        // Domain Model から DTO への変換
        Ok(messages) => Ok(Json(messages.into_iter().map(Into::into).collect())),
        Err(GetChannelMessagesError::ChannelNotFound(name)) => {
            tracing::debug!("History requested for unknown channel '{}'", name);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponseDto {
                    error: "Channel not found".to_string(),
                }),
            ))
        }
    }
}
