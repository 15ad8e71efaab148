//! InMemory Channel Repository 実装（ChannelStore）
//!
//! ドメイン層が定義する ChannelRepository trait の具体的な実装。
//! チャンネル集合は起動時に固定され、以後増減しません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Channel, ChannelName, ChannelRepository, ChatMessage};

/// インメモリ Channel Repository 実装
///
/// チャンネル数は少なく固定のため、起動時の順序を保つ `Vec` で保持します。
pub struct InMemoryChannelRepository {
    channels: Mutex<Vec<Channel>>,
}

impl InMemoryChannelRepository {
    /// 指定されたチャンネル名で新しい InMemoryChannelRepository を作成
    ///
    /// 重複した名前は最初の 1 つだけが使われます。
    pub fn new(names: impl IntoIterator<Item = ChannelName>) -> Self {
        Self::from_channels(names.into_iter().map(Channel::new))
    }

    /// 作成済みの Channel から InMemoryChannelRepository を作成
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        let mut unique: Vec<Channel> = Vec::new();
        for channel in channels {
            if unique.iter().all(|c| c.name != channel.name) {
                unique.push(channel);
            }
        }
        Self {
            channels: Mutex::new(unique),
        }
    }
}

#[async_trait]
impl ChannelRepository for InMemoryChannelRepository {
    async fn exists(&self, name: &ChannelName) -> bool {
        let channels = self.channels.lock().await;
        channels.iter().any(|c| &c.name == name)
    }

    async fn list_channel_names(&self) -> Vec<ChannelName> {
        let channels = self.channels.lock().await;
        channels.iter().map(|c| c.name.clone()).collect()
    }

    async fn get_history(&self, name: &ChannelName) -> Option<Vec<ChatMessage>> {
        let channels = self.channels.lock().await;
        channels
            .iter()
            .find(|c| &c.name == name)
            .map(Channel::messages)
    }

    async fn append(&self, name: &ChannelName, message: ChatMessage) -> bool {
        let mut channels = self.channels.lock().await;
        match channels.iter_mut().find(|c| &c.name == name) {
            Some(channel) => {
                channel.push_message(message);
                true
            }
            None => {
                tracing::debug!("Channel '{}' not found, message not stored", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MAX_CHANNEL_HISTORY, MessageText, Timestamp, Username};

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryChannelRepository の exists / list / get_history / append
    // - 履歴の上限（100 件）と FIFO での削除
    //
    // 【なぜこのテストが必要か】
    // - 履歴長が上限を超えないことはドメインの不変条件
    // - 存在しないチャンネルへの操作はエラーにせず無視する方針を保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. 起動時のチャンネル名一覧
    // 2. 存在確認
    // 3. 追加と取得
    // 4. 存在しないチャンネルへの追加・取得
    // 5. 101 件追加時の FIFO 削除
    // ========================================

    fn create_test_repository() -> InMemoryChannelRepository {
        InMemoryChannelRepository::new(vec![
            ChannelName::from("general"),
            ChannelName::from("random"),
        ])
    }

    fn create_message(username: &str, text: &str, timestamp: i64) -> ChatMessage {
        ChatMessage::new(
            Username::new(username.to_string()),
            MessageText::new(text.to_string()),
            Timestamp::new(timestamp),
        )
    }

    #[tokio::test]
    async fn test_list_channel_names_keeps_startup_order() {
        // テスト項目: チャンネル名が起動時の順序で返され、重複は除かれる
        // given (前提条件):
        let repo = InMemoryChannelRepository::new(vec![
            ChannelName::from("general"),
            ChannelName::from("random"),
            ChannelName::from("general"),
        ]);

        // when (操作):
        let names = repo.list_channel_names().await;

        // then (期待する結果):
        assert_eq!(
            names,
            vec![ChannelName::from("general"), ChannelName::from("random")]
        );
    }

    #[tokio::test]
    async fn test_exists() {
        // テスト項目: 固定のチャンネル集合に対して存在確認ができる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作) / then (期待する結果):
        assert!(repo.exists(&ChannelName::from("general")).await);
        assert!(repo.exists(&ChannelName::from("random")).await);
        assert!(!repo.exists(&ChannelName::from("unknown")).await);
    }

    #[tokio::test]
    async fn test_append_and_get_history() {
        // テスト項目: 追加したメッセージが古い順に取得できる
        // given (前提条件):
        let repo = create_test_repository();
        let general = ChannelName::from("general");

        // when (操作):
        let stored1 = repo.append(&general, create_message("alice", "hello", 1)).await;
        let stored2 = repo.append(&general, create_message("bob", "hi", 2)).await;

        // then (期待する結果):
        assert!(stored1 && stored2);
        let history = repo.get_history(&general).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].username.as_str(), "alice");
        assert_eq!(history[1].text.as_str(), "hi");

        // 他のチャンネルには影響しない
        let random = repo.get_history(&ChannelName::from("random")).await.unwrap();
        assert!(random.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_channel_is_ignored() {
        // テスト項目: 存在しないチャンネルへの追加は何もせず、履歴取得は None
        // given (前提条件):
        let repo = create_test_repository();
        let unknown = ChannelName::from("unknown");

        // when (操作):
        let stored = repo.append(&unknown, create_message("alice", "lost", 1)).await;

        // then (期待する結果):
        assert!(!stored);
        assert!(repo.get_history(&unknown).await.is_none());
        assert!(!repo.exists(&unknown).await);
    }

    #[tokio::test]
    async fn test_history_is_bounded_with_fifo_eviction() {
        // テスト項目: 101 件追加すると最初の 1 件が消え、#2..#101 が順に残る
        // given (前提条件):
        let repo = create_test_repository();
        let general = ChannelName::from("general");

        // when (操作):
        for n in 1..=101 {
            repo.append(&general, create_message("alice", &format!("#{}", n), n))
                .await;
        }

        // then (期待する結果):
        let history = repo.get_history(&general).await.unwrap();
        assert_eq!(history.len(), MAX_CHANNEL_HISTORY);
        assert!(history.iter().all(|m| m.text.as_str() != "#1"));
        for (index, message) in history.iter().enumerate() {
            assert_eq!(message.text.as_str(), format!("#{}", index + 2));
        }
    }
}
