//! Typed error hierarchy for the taskboard client.
//!
//! Three top-level enums cover the three subsystems:
//! - `ApiError`: HTTP round-trip failures (transport, rejection, decoding)
//! - `BoardError`: board controller failures, local and remote
//! - `SessionError`: durable session storage failures

use thiserror::Error;

/// Errors from a single HTTP round trip against the task-tracker service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Not found: {detail}")]
    NotFound { detail: String },

    #[error("Not authorized ({status}): {detail}")]
    Unauthorized { status: u16, detail: String },

    #[error("Request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl ApiError {
    /// HTTP status of a server-side rejection, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Unauthorized { status, .. } | ApiError::Rejected { status, .. } => {
                Some(*status)
            }
            ApiError::Transport(_) | ApiError::Decode { .. } => None,
        }
    }

    /// Build the error for a non-success response from its status and the
    /// `detail` the service put in the body.
    pub fn from_status(status: u16, detail: String) -> Self {
        match status {
            404 => ApiError::NotFound { detail },
            401 | 403 => ApiError::Unauthorized { status, detail },
            _ => ApiError::Rejected { status, detail },
        }
    }
}

/// Errors from the board controller.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{0}")]
    Validation(String),

    #[error("No project selected")]
    NoProjectSelected,

    #[error("Project {id} not found locally")]
    ProjectNotFound { id: i64 },

    #[error("Task {id} not found locally")]
    TaskNotFound { id: i64 },

    #[error("Cannot move task {id} from {from} to {to} with an action button")]
    TransitionNotAllowed {
        id: i64,
        from: taskboard_common::TaskStatus,
        to: taskboard_common::TaskStatus,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl BoardError {
    /// True when the failure was caught locally, before any network call.
    pub fn is_local(&self) -> bool {
        !matches!(self, BoardError::Api(_))
    }
}

/// Errors from the durable session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file at {path} is corrupt: {source}")]
    Corrupt {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session store lock poisoned")]
    LockPoisoned,
}
