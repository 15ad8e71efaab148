//! Server configuration.

use axum::http::HeaderValue;
use thiserror::Error;

use crate::domain::ChannelName;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Port used when neither `--port` nor `PORT` is given
pub const DEFAULT_PORT: u16 = 3001;

/// Channels created at startup
pub const DEFAULT_CHANNELS: [&str; 2] = ["general", "random"];

/// Origins allowed to call the API from a browser
pub const ALLOWED_ORIGINS: [&str; 2] = [
    "https://sirmemecord.vercel.app",
    "https://sircord-backend.onrender.com",
];

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No channel would exist
    #[error("At least one channel must be configured")]
    NoChannels,

    /// A channel name is empty after trimming
    #[error("Channel names must not be empty")]
    EmptyChannelName,

    /// An origin is not a valid header value
    #[error("Invalid allowed origin '{0}'")]
    InvalidOrigin(String),
}

/// Validated server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub channels: Vec<ChannelName>,
    pub allowed_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Build a configuration with the fixed origin allow-list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the channel list is empty or contains an
    /// empty name.
    pub fn new(host: String, port: u16, channels: Vec<String>) -> Result<Self, ConfigError> {
        Self::with_origins(host, port, channels, &ALLOWED_ORIGINS)
    }

    /// Build a configuration with a custom origin allow-list.
    pub fn with_origins(
        host: String,
        port: u16,
        channels: Vec<String>,
        origins: &[&str],
    ) -> Result<Self, ConfigError> {
        if channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        let channels = channels
            .into_iter()
            .map(|name| {
                let name = name.trim();
                if name.is_empty() {
                    Err(ConfigError::EmptyChannelName)
                } else {
                    Ok(ChannelName::new(name.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let allowed_origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            host,
            port,
            channels,
            allowed_origins,
        })
    }

    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            channels: DEFAULT_CHANNELS.iter().map(|&name| ChannelName::from(name)).collect(),
            allowed_origins: ALLOWED_ORIGINS
                .iter()
                .map(|&origin| HeaderValue::from_static(origin))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定はポート 3001、general / random、固定の 2 オリジン
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "0.0.0.0:3001");
        assert_eq!(
            config.channels,
            vec![ChannelName::from("general"), ChannelName::from("random")]
        );
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.allowed_origins[0], "https://sirmemecord.vercel.app");
    }

    #[test]
    fn test_new_trims_channel_names() {
        // テスト項目: チャンネル名の前後の空白が取り除かれる
        // given (前提条件):
        let channels = vec![" general".to_string(), "random ".to_string()];

        // when (操作):
        let config = ServerConfig::new("127.0.0.1".to_string(), 8080, channels).unwrap();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(
            config.channels,
            vec![ChannelName::from("general"), ChannelName::from("random")]
        );
    }

    #[test]
    fn test_new_rejects_invalid_channels() {
        // テスト項目: チャンネルが空、または空の名前を含む場合はエラー
        // given (前提条件):
        let host = "127.0.0.1".to_string();

        // when (操作):
        let no_channels = ServerConfig::new(host.clone(), 8080, vec![]);
        let empty_name = ServerConfig::new(host, 8080, vec!["general".to_string(), " ".to_string()]);

        // then (期待する結果):
        assert_eq!(no_channels, Err(ConfigError::NoChannels));
        assert_eq!(empty_name, Err(ConfigError::EmptyChannelName));
    }

    #[test]
    fn test_with_origins_rejects_invalid_header_value() {
        // テスト項目: ヘッダー値として不正なオリジンはエラー
        // given (前提条件):
        let origins = ["https://ok.example", "bad\norigin"];

        // when (操作):
        let result = ServerConfig::with_origins(
            "127.0.0.1".to_string(),
            8080,
            vec!["general".to_string()],
            &origins,
        );

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ConfigError::InvalidOrigin("bad\norigin".to_string()))
        );
    }
}
