// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared across the pipeline.
//!
//! Component operations return the precise [`Error`] variant; the request
//! layer maps [`ErrorKind`] to an external status without reinterpreting it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing caller input. Not retryable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// A required backing store is not configured for this deployment.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A sandboxed command failed to start or exited non-zero.
    #[error("{args:?} failed with {message}{}", stderr_suffix(.stderr))]
    ExecutionFailure { args: Vec<String>, message: String, stderr: String },

    /// The warehouse or job store could not be reached or returned garbage.
    #[error("storage access failed: {0}")]
    StorageAccess(String),

    #[error("operation cancelled")]
    Cancelled,
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn storage(msg: impl std::fmt::Display) -> Self {
        Self::StorageAccess(msg.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::NotImplemented(_) => ErrorKind::NotImplemented,
            Error::ExecutionFailure { .. } => ErrorKind::ExecutionFailure,
            Error::StorageAccess(_) => ErrorKind::StorageAccess,
            Error::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::StorageAccess(format!("malformed record: {e}"))
    }
}

/// Tag-only variant of [`Error`] for status mapping and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    NotImplemented,
    ExecutionFailure,
    StorageAccess,
    Cancelled,
}

impl ErrorKind {
    /// HTTP-style status code surfaced by the request layer.
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::NotImplemented => 501,
            ErrorKind::ExecutionFailure | ErrorKind::StorageAccess => 500,
            ErrorKind::Cancelled => 499,
        }
    }

    /// Whether a caller may reasonably retry the same request.
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::StorageAccess | ErrorKind::Cancelled)
    }
}

crate::simple_display! {
    ErrorKind {
        InvalidArgument => "invalid_argument",
        NotFound => "not_found",
        NotImplemented => "not_implemented",
        ExecutionFailure => "execution_failure",
        StorageAccess => "storage_access",
        Cancelled => "cancelled",
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
