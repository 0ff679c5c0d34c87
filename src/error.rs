//! Error types for the agenda client.

use thiserror::Error;

use crate::models::TaskId;

/// Errors surfaced by the task client.
///
/// Transport failures, non-2xx statuses and undecodable bodies all collapse
/// into [`AgendaError::RequestFailed`]; the service contract does not let the
/// client tell them apart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgendaError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("{0}")]
    RequestFailed(String),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

impl AgendaError {
    pub fn status(code: u16) -> Self {
        AgendaError::RequestFailed(format!("HTTP {code}"))
    }
}

impl From<reqwest::Error> for AgendaError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AgendaError::status(status.as_u16()),
            None => AgendaError::RequestFailed(e.to_string()),
        }
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
