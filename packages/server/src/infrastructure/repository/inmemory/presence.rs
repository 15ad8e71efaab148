//! InMemory Presence Repository 実装（PresenceRegistry）
//!
//! 接続 ID をキーにユーザーセッションを保持します。セッションは挿入順の
//! `Vec` で保持するため、ユーザー一覧は参加順になります（順序は保証しない契約）。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChannelName, ConnectionId, PresenceRepository, UserPresence, UserSession, Username,
};

/// インメモリ Presence Repository 実装
#[derive(Default)]
pub struct InMemoryPresenceRepository {
    sessions: Mutex<Vec<UserSession>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録されているセッション数
    pub async fn count_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn join(&self, connection_id: ConnectionId, username: Username, channel: ChannelName) {
        let mut sessions = self.sessions.lock().await;
        match sessions
            .iter_mut()
            .find(|s| s.connection_id == connection_id)
        {
            // 上書きでも元の位置を保つ
            Some(session) => {
                session.username = username;
                session.channel = channel;
            }
            None => sessions.push(UserSession::new(connection_id, username, channel)),
        }
    }

    async fn switch_channel(&self, connection_id: &ConnectionId, channel: ChannelName) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions
            .iter_mut()
            .find(|s| &s.connection_id == connection_id)
        {
            session.channel = channel;
        }
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<UserSession> {
        let mut sessions = self.sessions.lock().await;
        let index = sessions
            .iter()
            .position(|s| &s.connection_id == connection_id)?;
        Some(sessions.remove(index))
    }

    async fn list_users(&self, channel: &ChannelName) -> Vec<UserPresence> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|s| &s.channel == channel)
            .map(UserSession::presence)
            .collect()
    }

    async fn find(&self, connection_id: &ConnectionId) -> Option<UserSession> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .find(|s| &s.connection_id == connection_id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - join / switch_channel / remove / list_users / find
    //
    // 【なぜこのテストが必要か】
    // - ユーザー一覧の配信内容は PresenceRegistry から導出される
    // - セッションがない接続への操作は何もしない方針を保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. join 直後の list_users に含まれる
    // 2. 同じ接続での再 join は上書き（重複しない）
    // 3. ユーザー名の重複は許可
    // 4. switch_channel で旧チャンネルから消え、新チャンネルに現れる
    // 5. 未登録接続の switch_channel / remove は何もしない
    // 6. remove 後は list_users に含まれない
    // ========================================

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    fn user(name: &str) -> Username {
        Username::new(name.to_string())
    }

    fn usernames(users: &[UserPresence]) -> Vec<&str> {
        users.iter().map(|u| u.username.as_str()).collect()
    }

    #[tokio::test]
    async fn test_join_then_list_users_includes_session() {
        // テスト項目: join 直後の list_users に {username, channel} が含まれる
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let general = ChannelName::from("general");

        // when (操作):
        repo.join(conn("c1"), user("alice"), general.clone()).await;
        let users = repo.list_users(&general).await;

        // then (期待する結果):
        assert_eq!(
            users,
            vec![UserPresence {
                username: user("alice"),
                channel: general.clone(),
            }]
        );
        let session = repo.find(&conn("c1")).await.unwrap();
        assert_eq!(session.channel, general);
    }

    #[tokio::test]
    async fn test_rejoin_overwrites_session_in_place() {
        // テスト項目: 同じ接続での再 join は既存セッションを上書きし、順序を保つ
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let general = ChannelName::from("general");
        repo.join(conn("c1"), user("alice"), general.clone()).await;
        repo.join(conn("c2"), user("bob"), general.clone()).await;

        // when (操作):
        repo.join(conn("c1"), user("alice2"), general.clone()).await;

        // then (期待する結果):
        assert_eq!(repo.count_sessions().await, 2);
        assert_eq!(usernames(&repo.list_users(&general).await), vec!["alice2", "bob"]);
    }

    #[tokio::test]
    async fn test_duplicate_usernames_are_allowed() {
        // テスト項目: 異なる接続で同じユーザー名を使える
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let general = ChannelName::from("general");

        // when (操作):
        repo.join(conn("c1"), user("alice"), general.clone()).await;
        repo.join(conn("c2"), user("alice"), general.clone()).await;

        // then (期待する結果):
        assert_eq!(usernames(&repo.list_users(&general).await), vec!["alice", "alice"]);
    }

    #[tokio::test]
    async fn test_switch_channel_moves_session() {
        // テスト項目: switch_channel 後、旧チャンネルから消え新チャンネルに現れる
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let general = ChannelName::from("general");
        let random = ChannelName::from("random");
        repo.join(conn("c1"), user("alice"), general.clone()).await;
        repo.join(conn("c2"), user("bob"), general.clone()).await;

        // when (操作):
        repo.switch_channel(&conn("c1"), random.clone()).await;

        // then (期待する結果):
        assert_eq!(usernames(&repo.list_users(&general).await), vec!["bob"]);
        let random_users = repo.list_users(&random).await;
        assert_eq!(usernames(&random_users), vec!["alice"]);
        assert_eq!(random_users[0].channel, random);
    }

    #[tokio::test]
    async fn test_unknown_connection_is_ignored() {
        // テスト項目: 未登録接続の switch_channel / remove / find は何もしない
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        repo.join(conn("c1"), user("alice"), ChannelName::from("general"))
            .await;

        // when (操作):
        repo.switch_channel(&conn("ghost"), ChannelName::from("random"))
            .await;
        let removed = repo.remove(&conn("ghost")).await;

        // then (期待する結果):
        assert!(removed.is_none());
        assert!(repo.find(&conn("ghost")).await.is_none());
        assert!(repo.list_users(&ChannelName::from("random")).await.is_empty());
        assert_eq!(repo.count_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_remove_excludes_session_from_list() {
        // テスト項目: remove 後は list_users に含まれず、削除したセッションが返る
        // given (前提条件):
        let repo = InMemoryPresenceRepository::new();
        let general = ChannelName::from("general");
        repo.join(conn("c1"), user("alice"), general.clone()).await;
        repo.join(conn("c2"), user("bob"), general.clone()).await;

        // when (操作):
        let removed = repo.remove(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(removed.unwrap().username, user("alice"));
        assert_eq!(usernames(&repo.list_users(&general).await), vec!["bob"]);
    }
}
