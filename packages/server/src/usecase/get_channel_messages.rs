//! UseCase: チャンネルのメッセージ履歴の取得

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository, ChatMessage};

use super::error::GetChannelMessagesError;

/// メッセージ履歴取得のユースケース
pub struct GetChannelMessagesUseCase {
    /// Repository（ChannelStore の抽象化）
    repository: Arc<dyn ChannelRepository>,
}

impl GetChannelMessagesUseCase {
    /// 新しい GetChannelMessagesUseCase を作成
    pub fn new(repository: Arc<dyn ChannelRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ履歴（古い順）を返す
    ///
    /// # Errors
    ///
    /// チャンネルが存在しない場合は `GetChannelMessagesError::ChannelNotFound`
    pub async fn execute(
        &self,
        channel: ChannelName,
    ) -> Result<Vec<ChatMessage>, GetChannelMessagesError> {
        self.repository
            .get_history(&channel)
            .await
            .ok_or_else(|| GetChannelMessagesError::ChannelNotFound(channel.into_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessageText, Timestamp, Username},
        infrastructure::repository::InMemoryChannelRepository,
    };

    fn create_test_repository() -> Arc<InMemoryChannelRepository> {
        Arc::new(InMemoryChannelRepository::new(vec![
            ChannelName::from("general"),
            ChannelName::from("random"),
        ]))
    }

    #[tokio::test]
    async fn test_get_channel_messages_success() {
        // テスト項目: 既存チャンネルの履歴が古い順に返される
        // given (前提条件):
        let repository = create_test_repository();
        let general = ChannelName::from("general");
        for (n, text) in ["first", "second"].iter().enumerate() {
            repository
                .append(
                    &general,
                    ChatMessage::new(
                        Username::new("alice".to_string()),
                        MessageText::new(text.to_string()),
                        Timestamp::new(n as i64),
                    ),
                )
                .await;
        }
        let usecase = GetChannelMessagesUseCase::new(repository);

        // when (操作):
        let result = usecase.execute(general).await;

        // then (期待する結果):
        let messages = result.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text.as_str(), "first");
        assert_eq!(messages[1].text.as_str(), "second");
    }

    #[tokio::test]
    async fn test_get_channel_messages_empty_channel() {
        // テスト項目: メッセージのない既存チャンネルは空の履歴を返す
        // given (前提条件):
        let usecase = GetChannelMessagesUseCase::new(create_test_repository());

        // when (操作):
        let result = usecase.execute(ChannelName::from("random")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_get_channel_messages_channel_not_found() {
        // テスト項目: 存在しないチャンネルは ChannelNotFound になる
        // given (前提条件):
        let usecase = GetChannelMessagesUseCase::new(create_test_repository());

        // when (操作):
        let result = usecase.execute(ChannelName::from("unknown")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(GetChannelMessagesError::ChannelNotFound("unknown".to_string()))
        );
    }
}
