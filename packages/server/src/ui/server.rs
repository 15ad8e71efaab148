//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{GetChannelMessagesUseCase, GetChannelsUseCase, SessionHandler},
};

use super::{
    handler::{get_channel_messages, get_channels, health_check, liveness, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// # Routes
///
/// * `GET /` - liveness text
/// * `GET /ws` - WebSocket endpoint
/// * `GET /api/health` - health check
/// * `GET /api/channels` - channel names
/// * `GET /api/channels/{channel_id}/messages` - channel history
pub fn build_router(app_state: Arc<AppState>, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true);

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/", get(liveness))
        .route("/api/health", get(health_check))
        .route("/api/channels", get(get_channels))
        .route("/api/channels/{channel_id}/messages", get(get_channel_messages))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     session_handler,
///     get_channels_usecase,
///     get_channel_messages_usecase,
/// );
/// server.run(ServerConfig::default()).await?;
/// ```
pub struct Server {
    /// SessionHandler（接続ごとのセッション処理）
    session_handler: Arc<SessionHandler>,
    /// GetChannelsUseCase（チャンネル一覧取得のユースケース）
    get_channels_usecase: Arc<GetChannelsUseCase>,
    /// GetChannelMessagesUseCase（メッセージ履歴取得のユースケース）
    get_channel_messages_usecase: Arc<GetChannelMessagesUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        session_handler: Arc<SessionHandler>,
        get_channels_usecase: Arc<GetChannelsUseCase>,
        get_channel_messages_usecase: Arc<GetChannelMessagesUseCase>,
    ) -> Self {
        Self {
            session_handler,
            get_channels_usecase,
            get_channel_messages_usecase,
        }
    }

    /// Run the chat relay server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            session_handler: self.session_handler,
            get_channels_usecase: self.get_channels_usecase,
            get_channel_messages_usecase: self.get_channel_messages_usecase,
        });
        let app = build_router(app_state, config.allowed_origins.clone());

        // Bind the server to the host and port
        let bind_addr = config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
