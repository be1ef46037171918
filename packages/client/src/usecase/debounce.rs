//! Single-slot debouncer.

use std::{
    future::Future,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use tokio::task::JoinHandle;

/// Runs a task once a quiet period has elapsed since the last trigger.
///
/// Holds at most one pending task: scheduling a new one aborts the previous
/// one, whether it is still waiting or already running.
pub struct Debouncer {
    delay: Duration,
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Re-arm the debouncer with a new task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        if let Some(previous) = self.slot().replace(handle) {
            previous.abort();
        }
    }

    /// Drop the pending task, if any.
    pub fn cancel(&self) {
        if let Some(previous) = self.slot().take() {
            previous.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|h| !h.is_finished())
    }

    fn slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_after_delay() {
        // テスト項目: 遅延時間経過後にタスクが実行される
        // given (前提条件):
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let counter = Arc::new(AtomicUsize::new(0));

        // when (操作):
        debouncer.schedule(counter_task(&counter));
        tokio::time::sleep(Duration::from_millis(299)).await;
        let before = counter.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;

        // then (期待する結果):
        assert_eq!(before, 0);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_replaces_pending_task() {
        // テスト項目: 連続してスケジュールすると最後のタスクのみ実行される
        // given (前提条件):
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let counter = Arc::new(AtomicUsize::new(0));

        // when (操作):
        for _ in 0..5 {
            debouncer.schedule(counter_task(&counter));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;

        // then (期待する結果):
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        // テスト項目: キャンセルすると保留中のタスクは実行されない
        // given (前提条件):
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let counter = Arc::new(AtomicUsize::new(0));
        debouncer.schedule(counter_task(&counter));
        assert!(debouncer.is_pending());

        // when (操作):
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        // then (期待する結果):
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!debouncer.is_pending());
    }
}
