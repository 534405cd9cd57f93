use std::future::Future;

use tokio::task::JoinHandle;
use tracing::trace;

use super::CancellationFlag;

/// Handle to one spawned operation.
#[derive(Debug)]
pub struct TaskHandle {
    flag: CancellationFlag,
    join: JoinHandle<()>,
}

impl TaskHandle {
    /// Requests cancellation. Synchronous, idempotent, never fails.
    pub fn cancel(&self) {
        self.flag.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_cancelled()
    }

    /// Returns true once the operation's future has returned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Holds the single in-flight operation of one owner (a row, a search box).
///
/// Replacing cancels the previous operation before the next one is spawned.
/// Owned by exactly one caller, hence `&mut self` everywhere.
#[derive(Debug, Default)]
pub struct CancellableTaskSlot {
    current: Option<TaskHandle>,
    started: u64,
}

impl CancellableTaskSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the current operation, if any, then spawns the one built by
    /// `factory` with a fresh cancellation flag.
    ///
    /// Must be called from within a tokio runtime.
    pub fn replace<F, Fut>(&mut self, factory: F)
    where
        F: FnOnce(CancellationFlag) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel_current();

        let flag = CancellationFlag::new();
        let join = tokio::spawn(factory(flag.clone()));
        self.started += 1;
        trace!(operation = self.started, "Slot operation started");
        self.current = Some(TaskHandle { flag, join });
    }

    /// Cancels the current operation and leaves the slot empty.
    pub fn clear(&mut self) {
        self.cancel_current();
    }

    /// Returns true while an uncancelled operation is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|h| !h.is_cancelled() && !h.is_finished())
    }

    /// Number of operations started through this slot.
    #[must_use]
    pub const fn started(&self) -> u64 {
        self.started
    }

    fn cancel_current(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
            trace!(operation = self.started, "Slot operation cancelled");
        }
    }
}

impl Drop for CancellableTaskSlot {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::watch;

    fn committing_op(
        value: u64,
        delay_ms: u64,
        target: Arc<watch::Sender<Option<u64>>>,
        commits: Arc<AtomicUsize>,
    ) -> impl FnOnce(CancellationFlag) -> std::pin::Pin<Box<dyn Future<Output = ()> + Send>> {
        move |flag| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                if flag.commit(&*target, Some(value)) {
                    commits.fetch_add(1, Ordering::SeqCst);
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_replacement_commits() {
        let (tx, rx) = watch::channel(None);
        let tx = Arc::new(tx);
        let commits = Arc::new(AtomicUsize::new(0));
        let mut slot = CancellableTaskSlot::new();

        // Earlier operations finish later, so every one of them arrives stale.
        for n in 0..5u64 {
            slot.replace(committing_op(n, (5 - n) * 10, tx.clone(), commits.clone()));
        }

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(*rx.borrow(), Some(4));
        assert_eq!(commits.load(Ordering::SeqCst), 1);
        assert_eq!(slot.started(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_pending_result() {
        let (tx, rx) = watch::channel(None);
        let commits = Arc::new(AtomicUsize::new(0));
        let mut slot = CancellableTaskSlot::new();

        slot.replace(committing_op(1, 10, Arc::new(tx), commits.clone()));
        assert!(slot.is_active());

        slot.clear();
        assert!(!slot.is_active());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*rx.borrow(), None);
        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_operation_is_inactive() {
        let (tx, rx) = watch::channel(None);
        let commits = Arc::new(AtomicUsize::new(0));
        let mut slot = CancellableTaskSlot::new();

        slot.replace(committing_op(7, 1, Arc::new(tx), commits));
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(*rx.borrow(), Some(7));
        assert!(!slot.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_operation() {
        let (tx, rx) = watch::channel(None);
        let commits = Arc::new(AtomicUsize::new(0));

        {
            let mut slot = CancellableTaskSlot::new();
            slot.replace(committing_op(3, 10, Arc::new(tx), commits.clone()));
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*rx.borrow(), None);
        assert_eq!(commits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_on_empty_slot_is_noop() {
        let mut slot = CancellableTaskSlot::new();
        slot.clear();
        assert!(!slot.is_active());
        assert_eq!(slot.started(), 0);
    }
}
