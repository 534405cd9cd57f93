use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

/// Cooperative cancellation flag shared between a slot and its operation.
///
/// Raising the flag never blocks and never fails. The operation polls it at
/// its suspension points and must commit results through [`Self::commit`] or
/// [`Self::commit_with`], which re-check it under the target's lock.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Publishes `value` into `target` unless cancelled.
    ///
    /// Returns whether the value was committed.
    pub fn commit<T>(&self, target: &watch::Sender<T>, value: T) -> bool {
        self.commit_with(target, |current| {
            *current = value;
            true
        })
    }

    /// Runs `apply` on the current value of `target` unless cancelled.
    ///
    /// The flag is checked while the sender's lock is held, so a writer that
    /// cancels this flag and then publishes can never be overwritten by this
    /// commit. `apply` returns whether it modified the value.
    pub fn commit_with<T>(
        &self,
        target: &watch::Sender<T>,
        apply: impl FnOnce(&mut T) -> bool,
    ) -> bool {
        target.send_if_modified(|current| {
            if self.is_cancelled() {
                return false;
            }
            apply(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_idempotent() {
        let flag = CancellationFlag::new();
        assert!(!flag.is_cancelled());
        flag.cancel();
        flag.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = CancellationFlag::new();
        let seen_by_task = flag.clone();
        flag.cancel();
        assert!(seen_by_task.is_cancelled());
    }

    #[test]
    fn test_commit_skipped_after_cancel() {
        let (tx, rx) = watch::channel(0);
        let flag = CancellationFlag::new();

        assert!(flag.commit(&tx, 1));
        assert_eq!(*rx.borrow(), 1);

        flag.cancel();
        assert!(!flag.commit(&tx, 2));
        assert_eq!(*rx.borrow(), 1);
    }

    #[test]
    fn test_commit_with_can_decline() {
        let (tx, rx) = watch::channel(5);
        let flag = CancellationFlag::new();

        assert!(!flag.commit_with(&tx, |_| false));
        assert_eq!(*rx.borrow(), 5);
    }
}
