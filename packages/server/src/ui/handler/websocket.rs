//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChannelName, ConnectionId, ConnectionIdFactory, MessageText, Username},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::SessionHandler,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: events broadcast to this
/// connection (via rx channel) are written to its WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .session_handler
        .connect(connection_id.clone(), tx)
        .await;

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let connection_id_clone = connection_id.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", connection_id_clone, text);
                    dispatch_event(
                        &state_clone.session_handler,
                        &connection_id_clone,
                        text.as_str(),
                    )
                    .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // Spawn a task to push broadcast events to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.session_handler.disconnect(&connection_id).await;
}

/// Parse one inbound frame and hand it to the SessionHandler.
///
/// Frames that are not valid events are dropped without notifying the client.
async fn dispatch_event(handler: &SessionHandler, connection_id: &ConnectionId, frame: &str) {
    match serde_json::from_str::<ClientEvent>(frame) {
        Ok(ClientEvent::Join { username, channel }) => {
            handler
                .join(
                    connection_id,
                    Username::new(username),
                    ChannelName::new(channel),
                )
                .await
        }
        Ok(ClientEvent::Message { text }) => {
            handler
                .send_message(connection_id, MessageText::new(text))
                .await
        }
        Ok(ClientEvent::SwitchChannel(channel)) => {
            handler
                .switch_channel(connection_id, ChannelName::new(channel))
                .await
        }
        Err(e) => {
            tracing::warn!("Ignoring invalid frame from '{}': {}", connection_id, e);
        }
    }
}
