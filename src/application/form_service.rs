// Form service - Settings, cart, rewards and marketplace filter handlers
use crate::application::notification_service::Notifier;
use crate::domain::notification::Severity;
use std::sync::Arc;

const UNKNOWN_WASTE_TYPE: &str = "Unknown waste type";
const UNKNOWN_REWARD: &str = "Unknown reward";
const ZERO_POINTS: &str = "0 pts";

#[derive(Clone)]
pub struct FormService {
    notifier: Arc<dyn Notifier>,
}

impl FormService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn settings_changed(&self, name: &str, value: &str) {
        // Nothing is persisted, the toast is the only effect
        tracing::info!(setting = name, value, "setting changed");
        self.notifier
            .notify("Settings saved successfully", Severity::Success);
    }

    pub fn add_to_cart(&self, item: Option<&str>) -> String {
        let message = format!("{} added to cart", non_blank(item).unwrap_or(UNKNOWN_WASTE_TYPE));
        self.notifier.notify(&message, Severity::Success);
        message
    }

    pub fn redeem_reward(&self, name: Option<&str>, cost: Option<&str>) -> String {
        let message = format!(
            "You redeemed {} for {}",
            non_blank(name).unwrap_or(UNKNOWN_REWARD),
            non_blank(cost).unwrap_or(ZERO_POINTS)
        );
        self.notifier.notify(&message, Severity::Success);
        message
    }

    pub fn marketplace_filter_changed(&self, name: &str, value: &str) {
        tracing::info!(filter = name, value, "marketplace filter changed");
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
