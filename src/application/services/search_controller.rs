//! Search session lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::application::tasks::CancellableTaskSlot;
use crate::domain::ports::CatalogPort;
use crate::domain::search_state::SearchState;

/// Drives the search screen state.
///
/// Every `start` opens a new session with a higher generation and cancels the
/// previous one through the owned slot. A finished session publishes its
/// result only if it is still the current generation and was not cancelled;
/// both checks run under the state channel's lock.
pub struct SearchController {
    catalog: Arc<dyn CatalogPort>,
    state: Arc<watch::Sender<SearchState>>,
    generation: Arc<AtomicU64>,
    slot: CancellableTaskSlot,
    /// State shown before the pending session published `Loading`.
    before_session: SearchState,
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("generation", &self.generation())
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Creates a controller in the `Initial` state.
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        let (state, _) = watch::channel(SearchState::Initial);
        Self {
            catalog,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            slot: CancellableTaskSlot::new(),
            before_session: SearchState::Initial,
        }
    }

    /// Starts a new search session for `query`, superseding any running one.
    ///
    /// Publishes `Loading` before returning. Returns the session generation.
    pub fn start(&mut self, query: impl Into<String>) -> u64 {
        let query = query.into();
        self.slot.clear();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, query = %query, "Starting search");
        let previous = self.state.send_replace(SearchState::Loading);
        if !previous.is_loading() {
            self.before_session = previous;
        }

        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let current = self.generation.clone();
        self.slot.replace(move |flag| async move {
            if flag.is_cancelled() {
                return;
            }

            let next = SearchState::from_result(catalog.search(&query).await);
            let outcome = next.to_string();

            let committed = flag.commit_with(&*state, |s| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *s = next;
                true
            });

            if committed {
                info!(generation, state = %outcome, "Search finished");
            } else {
                debug!(generation, "Discarded superseded search result");
            }
        });

        generation
    }

    /// Abandons the running session, if any.
    ///
    /// A session that has not published its result yet leaves `Loading`
    /// behind; that state is rolled back to the one shown before the session
    /// started. A finished session's result stays.
    pub fn cancel(&mut self) {
        if self.slot.is_active() {
            debug!(generation = self.generation(), "Search cancelled");
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.slot.clear();

        let restored = self.before_session.clone();
        self.state.send_if_modified(|s| {
            if !s.is_loading() {
                return false;
            }
            *s = restored;
            true
        });
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Generation of the most recent session.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use parking_lot::Mutex;

    use crate::domain::entities::{Item, ItemId};
    use crate::domain::errors::FetchError;
    use crate::domain::ports::mocks::MockCatalog;

    fn items(prefix: &str, ids: &[u64]) -> Vec<Item> {
        ids.iter()
            .enumerate()
            .map(|(pos, id)| {
                Item::new(
                    ItemId(*id),
                    format!("{prefix} {id}"),
                    "Acme",
                    format!("https://cdn.example.com/{id}.png"),
                )
                .with_position(pos)
            })
            .collect()
    }

    /// Records every state the controller publishes.
    fn record(controller: &SearchController) -> Arc<Mutex<Vec<SearchState>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut rx = controller.subscribe();
        let sink = seen.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                sink.lock().push(state);
            }
        });
        seen
    }

    #[tokio::test]
    async fn test_starts_in_initial_state() {
        let controller = SearchController::new(Arc::new(MockCatalog::new()));
        assert_eq!(controller.state(), SearchState::Initial);
        assert_eq!(controller.generation(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_result_becomes_empty() {
        let catalog =
            MockCatalog::new().with_route("mail", Duration::from_millis(10), Ok(Vec::new()));
        let mut controller = SearchController::new(Arc::new(catalog));

        controller.start("mail");
        assert_eq!(controller.state(), SearchState::Loading);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(controller.state(), SearchState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_becomes_failed() {
        let catalog = MockCatalog::new().with_route(
            "mail",
            Duration::from_millis(10),
            Err(FetchError::bad_response(503)),
        );
        let mut controller = SearchController::new(Arc::new(catalog));

        controller.start("mail");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            controller.state(),
            SearchState::Failed(FetchError::bad_response(503))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_search_never_lands() {
        let mail = items("Mail", &[1, 2, 3]);
        let chat = items("Chat", &[10, 11]);
        let catalog = Arc::new(
            MockCatalog::new()
                .with_route("mail", Duration::from_millis(100), Ok(mail))
                .with_route("chat", Duration::from_millis(10), Ok(chat.clone())),
        );
        let mut controller = SearchController::new(catalog.clone());
        let seen = record(&controller);

        controller.start("mail");
        controller.start("chat");
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(controller.state(), SearchState::Loaded(chat));
        assert_eq!(catalog.calls(), 1, "cancelled session never reached the catalog");
        assert!(
            seen.lock()
                .iter()
                .flat_map(SearchState::items)
                .all(|item| item.id().0 >= 10)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_result_of_running_session_is_dropped() {
        let catalog = Arc::new(
            MockCatalog::new()
                .with_route("mail", Duration::from_millis(100), Ok(items("Mail", &[1])))
                .with_route("chat", Duration::from_millis(10), Ok(items("Chat", &[2]))),
        );
        let mut controller = SearchController::new(catalog.clone());
        let seen = record(&controller);

        controller.start("mail");
        // Let the first session reach the catalog before superseding it.
        tokio::time::sleep(Duration::from_millis(5)).await;
        controller.start("chat");
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(catalog.calls(), 2);
        assert_eq!(controller.state().items()[0].id(), ItemId(2));
        assert!(
            seen.lock()
                .iter()
                .flat_map(SearchState::items)
                .all(|item| item.id() == ItemId(2))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_highest_generation_wins_regardless_of_completion_order() {
        let delays = [30u64, 10, 50, 20, 40];
        let mut catalog = MockCatalog::new();
        for (n, delay) in delays.iter().enumerate() {
            catalog = catalog.with_route(
                &format!("q{n}"),
                Duration::from_millis(*delay),
                Ok(items("Q", &[n as u64])),
            );
        }
        let mut controller = SearchController::new(Arc::new(catalog));

        for n in 0..delays.len() {
            controller.start(format!("q{n}"));
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(controller.generation(), 5);
        assert_eq!(controller.state().items()[0].id(), ItemId(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_restores_state_before_pending_session() {
        let mail = items("Mail", &[1]);
        let catalog = MockCatalog::new()
            .with_route("mail", Duration::from_millis(10), Ok(mail.clone()))
            .with_route("chat", Duration::from_millis(10), Ok(items("Chat", &[2])));
        let mut controller = SearchController::new(Arc::new(catalog));

        controller.start("mail");
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.start("chat");
        tokio::time::sleep(Duration::from_millis(5)).await;
        controller.cancel();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(controller.state(), SearchState::Loaded(mail));
        assert_eq!(controller.generation(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_of_back_to_back_sessions_restores_last_settled_state() {
        let catalog = MockCatalog::new()
            .with_route("mail", Duration::from_millis(10), Ok(Vec::new()))
            .with_route("chat", Duration::from_millis(10), Ok(items("Chat", &[2])));
        let mut controller = SearchController::new(Arc::new(catalog));

        controller.start("mail");
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.start("chat");
        controller.start("chat");
        controller.cancel();

        assert_eq!(controller.state(), SearchState::Empty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_result_keeps_result() {
        let mail = items("Mail", &[1]);
        let catalog =
            MockCatalog::new().with_route("mail", Duration::from_millis(10), Ok(mail.clone()));
        let mut controller = SearchController::new(Arc::new(catalog));

        controller.start("mail");
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.cancel();

        assert_eq!(controller.state(), SearchState::Loaded(mail));
    }
}
