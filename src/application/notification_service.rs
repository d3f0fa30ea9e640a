// Notification service - Toasts with auto-dismiss
use crate::application::settle_scheduler::SettleScheduler;
use crate::domain::notification::{Severity, Toast};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TOAST_TTL: Duration = Duration::from_secs(5);

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

pub struct NotificationCenter {
    toasts: Arc<Mutex<Vec<Toast>>>,
    next_id: AtomicU64,
    ttl: Duration,
    timers: SettleScheduler,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
            ttl,
            timers: SettleScheduler::new(),
        }
    }

    /// Show a toast and schedule its removal; returns the toast id
    pub fn push(&self, message: &str, severity: Severity) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.toasts
            .lock()
            .push(Toast::new(id, message.to_string(), severity));
        tracing::info!(id, ?severity, "{}", message);

        let toasts = self.toasts.clone();
        self.timers.schedule(timer_scope(id), self.ttl, async move {
            toasts.lock().retain(|t| t.id != id);
        });
        id
    }

    /// Manual dismiss; false when the toast is already gone
    pub fn dismiss(&self, id: u64) -> bool {
        self.timers.cancel(&timer_scope(id));
        let mut toasts = self.toasts.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    pub fn list(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(TOAST_TTL)
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, message: &str, severity: Severity) {
        self.push(message, severity);
    }
}

fn timer_scope(id: u64) -> String {
    format!("toast:{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_ttl() {
        let center = NotificationCenter::default();
        center.notify("Settings saved successfully", Severity::Success);

        let toasts = center.list();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].icon, "check-circle");

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(center.list().len(), 1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(center.list().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss() {
        let center = NotificationCenter::default();
        let first = center.push("one", Severity::Info);
        let second = center.push("two", Severity::Warning);

        assert!(center.dismiss(first));
        assert!(!center.dismiss(first));

        let toasts = center.list();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, second);
        assert_eq!(toasts[0].icon, "exclamation-triangle");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_toasts_leave_no_timers_behind() {
        let center = NotificationCenter::new(Duration::from_millis(10));
        for i in 0..1_000 {
            center.push(&format!("toast {i}"), Severity::Info);
        }
        assert_eq!(center.timers.pending(), 1_000);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(center.list().is_empty());
        assert_eq!(center.timers.pending(), 0);
    }
}
