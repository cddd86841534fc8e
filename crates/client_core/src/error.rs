use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

pub type DeskResult<T> = Result<T, DeskError>;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status} ({})", api.message)]
    Status { status: u16, api: ApiError },
    #[error("failed to decode response with status {status}: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    /// The server answered with an `error` field in its JSON body.
    #[error("{0}")]
    Application(String),
    #[error("{0}")]
    Validation(String),
}

impl DeskError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Status { api, .. } => api.code,
            Self::Validation(_) | Self::InvalidUrl { .. } => ErrorCode::Validation,
            Self::Transport(err) if err.is_connect() || err.is_timeout() => ErrorCode::Unavailable,
            _ => ErrorCode::Internal,
        }
    }

    /// Text suitable for an inline error area: the server's own message when
    /// it sent one, the full error otherwise.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { api, .. } => api.message.clone(),
            Self::Application(message) | Self::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
