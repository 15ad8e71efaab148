//! Channel-based chat relay server.
//!
//! Clients connect over WebSocket, join a channel and exchange messages with
//! everyone else in that channel.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatrelay-server
//! PORT=8080 cargo run --bin chatrelay-server -- --channels general,random,help
//! ```

use std::sync::Arc;

use chatrelay_server::{
    config::{DEFAULT_CHANNELS, DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    infrastructure::{
        broadcaster::WebSocketBroadcaster,
        repository::{InMemoryChannelRepository, InMemoryPresenceRepository},
    },
    ui::Server,
    usecase::{GetChannelMessagesUseCase, GetChannelsUseCase, SessionHandler},
};
use chatrelay_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatrelay-server")]
#[command(about = "Channel-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Channels available to clients (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_CHANNELS.map(String::from))]
    channels: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = match ServerConfig::new(args.host, args.port, args.channels) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Stores
    // 2. Broadcaster
    // 3. UseCases
    // 4. Server

    // 1. Create stores (in-memory)
    let channel_repository = Arc::new(InMemoryChannelRepository::new(config.channels.clone()));
    let presence_repository = Arc::new(InMemoryPresenceRepository::new());
    for channel in &config.channels {
        tracing::info!("Channel '{}' created!", channel);
    }

    // 2. Create Broadcaster (WebSocket implementation)
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 3. Create UseCases
    let session_handler = Arc::new(SessionHandler::new(
        presence_repository,
        channel_repository.clone(),
        broadcaster,
        Arc::new(SystemClock),
    ));
    let get_channels_usecase = Arc::new(GetChannelsUseCase::new(channel_repository.clone()));
    let get_channel_messages_usecase =
        Arc::new(GetChannelMessagesUseCase::new(channel_repository));

    // 4. Create and run the server
    let server = Server::new(
        session_handler,
        get_channels_usecase,
        get_channel_messages_usecase,
    );
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
