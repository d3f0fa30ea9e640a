// Toast notification domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Warning => "exclamation-triangle",
            Severity::Danger => "times-circle",
            Severity::Info => "info-circle",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub icon: &'static str,
}

impl Toast {
    pub fn new(id: u64, message: String, severity: Severity) -> Self {
        Self {
            id,
            message,
            severity,
            icon: severity.icon(),
        }
    }
}
