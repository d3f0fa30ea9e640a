// Settle scheduler - Cancelable deferred tasks keyed by scope
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

struct ScheduledTask {
    id: u64,
    handle: JoinHandle<()>,
}

/// Scheduling into an occupied scope aborts the task already there.
/// A task that runs to completion drops its own scope entry.
#[derive(Default)]
pub struct SettleScheduler {
    tasks: Arc<Mutex<HashMap<String, ScheduledTask>>>,
    next_id: AtomicU64,
}

impl SettleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` once `delay` has elapsed, replacing any pending task in `scope`.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, scope: impl Into<String>, delay: Duration, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scope = scope.into();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tasks = self.tasks.clone();
        let own_scope = scope.clone();

        // Held across the spawn so the task cannot finish before it is recorded
        let mut registered = self.tasks.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;

            let mut tasks = tasks.lock();
            if tasks.get(&own_scope).is_some_and(|task| task.id == id) {
                tasks.remove(&own_scope);
            }
        });

        if let Some(previous) = registered.insert(scope.clone(), ScheduledTask { id, handle }) {
            if !previous.handle.is_finished() {
                tracing::debug!(scope = %scope, "replacing pending task");
            }
            previous.handle.abort();
        }
    }

    pub fn cancel(&self, scope: &str) -> bool {
        match self.tasks.lock().remove(scope) {
            Some(task) => {
                let pending = !task.handle.is_finished();
                task.handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Cancel every scope whose name starts with `prefix`
    pub fn cancel_prefix(&self, prefix: &str) {
        self.tasks.lock().retain(|scope, task| {
            if scope.starts_with(prefix) {
                task.handle.abort();
                false
            } else {
                true
            }
        });
    }

    pub fn cancel_all(&self) {
        for (_, task) in self.tasks.lock().drain() {
            task.handle.abort();
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, scope: &str) -> bool {
        self.tasks
            .lock()
            .get(scope)
            .is_some_and(|task| !task.handle.is_finished())
    }

    /// Number of scopes still holding a task
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Drop for SettleScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(counter: Arc<AtomicUsize>, amount: usize) -> impl Future<Output = ()> + Send {
        async move {
            counter.fetch_add(amount, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let scheduler = SettleScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("section", Duration::from_millis(100), counter_task(counter.clone(), 1));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_pending("section"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending("section"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_scope_replaces_pending_task() {
        let scheduler = SettleScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("section", Duration::from_millis(100), counter_task(counter.clone(), 1));
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.schedule("section", Duration::from_millis(100), counter_task(counter.clone(), 10));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let scheduler = SettleScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("a", Duration::from_millis(100), counter_task(counter.clone(), 1));
        scheduler.schedule("panel:household", Duration::from_millis(100), counter_task(counter.clone(), 1));
        scheduler.schedule("panel:aggregator", Duration::from_millis(100), counter_task(counter.clone(), 1));
        assert_eq!(scheduler.pending(), 3);

        scheduler.cancel_prefix("panel:");
        assert_eq!(scheduler.pending(), 1);
        assert!(scheduler.cancel("a"));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        scheduler.schedule("b", Duration::from_millis(100), counter_task(counter.clone(), 1));
        scheduler.cancel_all();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_tasks_release_their_scope() {
        let scheduler = SettleScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for i in 0..1_000 {
            scheduler.schedule(format!("toast:{i}"), Duration::from_millis(10), counter_task(counter.clone(), 1));
        }
        assert_eq!(scheduler.pending(), 1_000);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1_000);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_task_keeps_newer_entry() {
        let scheduler = SettleScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("resize", Duration::from_millis(10), counter_task(counter.clone(), 1));
        scheduler.schedule("resize", Duration::from_millis(100), counter_task(counter.clone(), 10));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(scheduler.is_pending("resize"));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 10);
        assert_eq!(scheduler.pending(), 0);
    }
}
