use thiserror::Error;

/// Failures of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, TLS...).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{}", application_message(.status, .detail))]
    Application {
        status: u16,
        /// The `detail` field of the JSON error body, when present.
        detail: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

fn application_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(d) => d.clone(),
        None => format!("HTTP {}", status),
    }
}

impl ApiError {
    /// Message shown to the user for a failed action. Backend-reported errors
    /// are shown as-is; everything else gets the action context in front.
    pub fn user_message(&self, context: &str) -> String {
        match self {
            ApiError::Application { .. } => self.to_string(),
            _ => format!("{}: {}", context, self),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
