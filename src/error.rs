use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Please answer all {total} questions before submitting ({answered} answered)")]
    IncompleteSubmission { answered: usize, total: usize },

    #[error("Assignment already submitted")]
    AlreadyCompleted,

    #[error("{0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body returned by the backend. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

impl AppError {
    /// Text for a transient notification. A server-provided `detail` is shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            AppError::Api { status, .. } => format!("Request failed ({})", status),
            AppError::Transport(_) => "Could not reach the server".to_string(),
            AppError::Decode(_) => "Unexpected response from the server".to_string(),
            other => other.to_string(),
        }
    }

    /// True when the failure is worth retrying by hand (re-navigation, re-submission).
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Transport(_) => true,
            AppError::Api { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    pub(crate) fn from_response_body(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.detail)
            .filter(|d| !d.trim().is_empty());
        AppError::Api { status, detail }
    }
}
