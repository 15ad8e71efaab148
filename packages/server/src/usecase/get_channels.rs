//! UseCase: チャンネル一覧の取得

use std::sync::Arc;

use crate::domain::{ChannelName, ChannelRepository};

/// チャンネル一覧取得のユースケース
pub struct GetChannelsUseCase {
    /// Repository（ChannelStore の抽象化）
    repository: Arc<dyn ChannelRepository>,
}

impl GetChannelsUseCase {
    /// 新しい GetChannelsUseCase を作成
    pub fn new(repository: Arc<dyn ChannelRepository>) -> Self {
        Self { repository }
    }

    /// 全チャンネル名を起動時の順序で返す
    pub async fn execute(&self) -> Vec<ChannelName> {
        self.repository.list_channel_names().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryChannelRepository;

    #[tokio::test]
    async fn test_get_channels() {
        // テスト項目: 起動時に与えたチャンネル名が順に返される
        // given (前提条件):
        let repository = Arc::new(InMemoryChannelRepository::new(vec![
            ChannelName::from("general"),
            ChannelName::from("random"),
        ]));
        let usecase = GetChannelsUseCase::new(repository);

        // when (操作):
        let result = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(
            result,
            vec![ChannelName::from("general"), ChannelName::from("random")]
        );
    }
}
