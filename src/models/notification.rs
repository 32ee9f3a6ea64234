use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Error,
}

impl AlertLevel {
    /// Bootstrap contextual class suffix.
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Error => "danger",
        }
    }
}

/// A transient notification shown on top of the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub id: u64,
    pub level: AlertLevel,
    pub message: String,
}
