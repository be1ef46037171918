//! UseCase: debounced user search
//!
//! Input shorter than [`SearchQuery::MIN_CHARS`] clears the results without
//! touching the network. Longer input is searched [`SEARCH_DEBOUNCE`] after
//! the last edit; every new edit cancels the pending search, including one
//! whose request is already in flight, so stale results are never shown.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::domain::{ChatApi, ChatSession, ChatSurface, SearchQuery, ViewUpdate};

use super::{debounce::Debouncer, render_all};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shown when a search returns no users.
pub const NO_USERS_FOUND: &str = "No users found";

/// ユーザー検索のユースケース
pub struct SearchUsersUseCase {
    api: Arc<dyn ChatApi>,
    session: Arc<Mutex<ChatSession>>,
    surface: Arc<dyn ChatSurface>,
    debouncer: Debouncer,
}

impl SearchUsersUseCase {
    pub fn new(
        api: Arc<dyn ChatApi>,
        session: Arc<Mutex<ChatSession>>,
        surface: Arc<dyn ChatSurface>,
    ) -> Self {
        Self {
            api,
            session,
            surface,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    /// Handle an edit of the search input.
    pub async fn on_input(&self, raw: &str) {
        self.debouncer.cancel();

        let query = match SearchQuery::new(raw) {
            Ok(query) => query,
            Err(_) => {
                let mut session = self.session.lock().await;
                if !session.search_results().is_empty() {
                    let updates = session.clear_search_results();
                    render_all(self.surface.as_ref(), &updates);
                }
                return;
            }
        };

        let api = self.api.clone();
        let session = self.session.clone();
        let surface = self.surface.clone();

        self.debouncer.schedule(async move {
            let users = match api.search_users(&query).await {
                Ok(users) => users,
                Err(e) => {
                    tracing::debug!("User search for {:?} failed: {}", query.as_str(), e);
                    return;
                }
            };

            let found = !users.is_empty();
            let updates = session.lock().await.set_search_results(users);
            render_all(surface.as_ref(), &updates);
            if !found {
                surface.render(&ViewUpdate::Notice(NO_USERS_FOUND.to_string()));
            }
        });
    }

    /// Abandon any pending search.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{UserId, UserSummary, port::MockChatApi},
        error::ClientError,
        usecase::testing::RecordingSurface,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alice() -> UserSummary {
        UserSummary {
            id: UserId::new(2),
            username: "alice".to_string(),
            is_online: true,
        }
    }

    fn setup(api: MockChatApi) -> (SearchUsersUseCase, Arc<Mutex<ChatSession>>, Arc<RecordingSurface>) {
        let session = Arc::new(Mutex::new(ChatSession::new(None, Some(UserId::new(1)))));
        let surface = Arc::new(RecordingSurface::default());
        let usecase = SearchUsersUseCase::new(Arc::new(api), session.clone(), surface.clone());
        (usecase, session, surface)
    }

    fn counting_api(calls: &Arc<AtomicUsize>, users: Vec<UserSummary>) -> MockChatApi {
        let calls = calls.clone();
        let mut api = MockChatApi::new();
        api.expect_search_users().returning(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(users.clone())
        });
        api
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_character_never_hits_the_network() {
        // テスト項目: 1 文字の入力では検索リクエストが発行されない
        // given (前提条件):
        let calls = Arc::new(AtomicUsize::new(0));
        let (usecase, _session, surface) = setup(counting_api(&calls, vec![alice()]));

        // when (操作):
        usecase.on_input("a").await;
        usecase.on_input(" b ").await;
        advance(1000).await;

        // then (期待する結果):
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(surface.updates().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_issue_one_search_for_the_last_term() {
        // テスト項目: 素早い連続入力では最後の語句で 1 回だけ検索される
        // given (前提条件):
        let mut api = MockChatApi::new();
        api.expect_search_users()
            .withf(|query| query.as_str() == "alic")
            .times(1)
            .returning(|_| Ok(vec![alice()]));
        let (usecase, session, surface) = setup(api);

        // when (操作):
        usecase.on_input("al").await;
        advance(100).await;
        usecase.on_input("ali").await;
        advance(100).await;
        usecase.on_input("alic").await;
        advance(299).await;
        let before = surface.updates().len();
        advance(2).await;

        // then (期待する結果):
        assert_eq!(before, 0);
        assert_eq!(session.lock().await.search_results(), &[alice()]);
        assert_eq!(surface.updates(), vec![ViewUpdate::SearchResults(vec![alice()])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shortening_input_cancels_pending_search_and_clears_results() {
        // テスト項目: 入力を 2 文字未満に戻すと保留中の検索が取り消され結果が消える
        // given (前提条件):
        let calls = Arc::new(AtomicUsize::new(0));
        let (usecase, session, surface) = setup(counting_api(&calls, vec![alice()]));
        usecase.on_input("al").await;
        advance(400).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // when (操作):
        usecase.on_input("ali").await;
        advance(100).await;
        usecase.on_input("a").await;
        advance(1000).await;

        // then (期待する結果):
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(session.lock().await.search_results().is_empty());
        assert_eq!(surface.updates().last(), Some(&ViewUpdate::SearchResults(Vec::new())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_shows_no_users_found() {
        // テスト項目: 検索結果が空の場合は「No users found」が表示される
        // given (前提条件):
        let calls = Arc::new(AtomicUsize::new(0));
        let (usecase, _session, surface) = setup(counting_api(&calls, Vec::new()));

        // when (操作):
        usecase.on_input("zz").await;
        advance(400).await;

        // then (期待する結果):
        assert_eq!(
            surface.updates(),
            vec![
                ViewUpdate::SearchResults(Vec::new()),
                ViewUpdate::Notice(NO_USERS_FOUND.to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_is_silent() {
        // テスト項目: 検索の失敗は画面に何も表示しない
        // given (前提条件):
        let mut api = MockChatApi::new();
        api.expect_search_users()
            .times(1)
            .returning(|_| Err(ClientError::Unauthorized));
        let (usecase, _session, surface) = setup(api);

        // when (操作):
        usecase.on_input("alice").await;
        advance(400).await;

        // then (期待する結果):
        assert!(surface.updates().is_empty());
    }
}
