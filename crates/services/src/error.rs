//! Shared error types for the services crate.

use thiserror::Error;

use audit_core::model::{CategoryId, QuestionId};
use audit_core::schedule::ScheduleError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Generic text shown when the server could not be reached.
pub const TRANSPORT_MESSAGE: &str = "Could not reach the server. Please try again.";

/// Text used when a failed envelope carries no message of its own.
pub const APPLICATION_FALLBACK: &str = "The request could not be completed.";

/// Which side of the envelope contract failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Application,
}

/// Errors emitted by `RpcClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RpcError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
    #[error("{message}")]
    Application { message: String },
}

impl RpcError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Application { .. } => ErrorKind::Application,
            Self::HttpStatus(_) | Self::Http(_) | Self::Decode(_) | Self::Url(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// Message suitable for an alert: the server text for application errors,
    /// a generic line otherwise.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Application { message } => message.clone(),
            _ => TRANSPORT_MESSAGE.to_string(),
        }
    }
}

/// Errors raised while reading RPC settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid timeout `{0}`, expected whole seconds")]
    InvalidTimeout(String),
}

/// Misuse of the questionnaire walker by its host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WalkerError {
    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),
    #[error("no category is open")]
    NotActive,
    #[error("question {got} is not the one being asked")]
    UnexpectedQuestion { got: QuestionId },
    #[error("{choice} is not an answer for question {question}")]
    InvalidChoice { question: QuestionId, choice: String },
    #[error("no such follow-up is pending")]
    UnexpectedFollowUp,
    #[error("the attachment is not an image")]
    InvalidImage,
    #[error("input is locked while the assistant is typing")]
    InputLocked,
}

/// Errors emitted by the endpoint services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("answers could not be encoded: {0}")]
    Encode(serde_json::Error),
    #[error("no restaurant has been selected")]
    NoSelection,
}

impl ServiceError {
    /// Message suitable for an alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rpc(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Errors emitted by `ScheduleService::schedule_visit`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleVisitError {
    #[error(transparent)]
    InvalidDate(#[from] ScheduleError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl ScheduleVisitError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDate(err) => err.to_string(),
            Self::Rpc(err) => err.user_message(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_surface_server_text() {
        let err = RpcError::Application {
            message: "Restaurant not found".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.user_message(), "Restaurant not found");
    }

    #[test]
    fn transport_errors_use_generic_text() {
        let err = RpcError::HttpStatus(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.user_message(), TRANSPORT_MESSAGE);
    }
}
