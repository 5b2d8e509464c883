mod http_api;

pub use http_api::HttpReminderApi;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::reminder::{NewReminder, Reminder};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed, or its success body was unreadable.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
}

impl ApiError {
    /// Human-readable message the server attached to a failed response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            ApiError::Network(_) => None,
        }
    }
}

/// Result of a bulk clear, as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClearOutcome {
    #[serde(default)]
    pub cleared_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Remote reminder collection.
#[async_trait]
pub trait ReminderApi: Send + Sync {
    async fn create(&self, reminder: &NewReminder) -> Result<(), ApiError>;
    async fn list(&self) -> Result<Vec<Reminder>, ApiError>;
    async fn clear_all(&self) -> Result<ClearOutcome, ApiError>;
}
