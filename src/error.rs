//! # Error Classification
//!
//! Every failure the client surfaces is a [`WebHdfsError`]. HTTP failures are
//! sorted into a small set of kinds by status code, and each carries the
//! status plus the message the remote side reported.

use thiserror::Error;

use crate::types::RemoteExceptionResponse;

#[derive(Error, Debug)]
pub enum WebHdfsError {
    /// The service could not be reached at all.
    #[error("cannot connect to service: {0}")]
    Connection(String),

    /// HTTP 401.
    #[error("{message}")]
    PermissionDenied { status: u16, message: String },

    /// HTTP 403.
    #[error("{message}")]
    Forbidden { status: u16, message: String },

    /// HTTP 404.
    #[error("{message}")]
    NotFound { status: u16, message: String },

    /// Any other failing status, a `{"boolean": false}` result, or a local
    /// stream/decoding failure (no status).
    #[error("{message}")]
    Io {
        status: Option<u16>,
        message: String,
    },
}

impl WebHdfsError {
    pub fn io(status: u16, message: impl Into<String>) -> Self {
        WebHdfsError::Io {
            status: Some(status),
            message: message.into(),
        }
    }

    /// The HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            WebHdfsError::Connection(_) => None,
            WebHdfsError::PermissionDenied { status, .. }
            | WebHdfsError::Forbidden { status, .. }
            | WebHdfsError::NotFound { status, .. } => Some(*status),
            WebHdfsError::Io { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            WebHdfsError::Connection(message)
            | WebHdfsError::PermissionDenied { message, .. }
            | WebHdfsError::Forbidden { message, .. }
            | WebHdfsError::NotFound { message, .. }
            | WebHdfsError::Io { message, .. } => message,
        }
    }
}

impl From<std::io::Error> for WebHdfsError {
    fn from(e: std::io::Error) -> Self {
        WebHdfsError::Io {
            status: None,
            message: format!("I/O error: {}", e),
        }
    }
}

impl From<serde_json::Error> for WebHdfsError {
    fn from(e: serde_json::Error) -> Self {
        WebHdfsError::Io {
            status: None,
            message: format!("invalid response body: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, WebHdfsError>;

/// Maps a terminal non-success status and its response body to an error.
///
/// The message is taken from a WebHDFS `RemoteException` payload when the
/// body is one, otherwise from the raw body, otherwise from the status line.
pub fn classify(status: u16, body: &str) -> WebHdfsError {
    let message = remote_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            reason_phrase(status).to_string()
        } else {
            trimmed.to_string()
        }
    });
    match status {
        401 => WebHdfsError::PermissionDenied { status, message },
        403 => WebHdfsError::Forbidden { status, message },
        404 => WebHdfsError::NotFound { status, message },
        _ => WebHdfsError::io(status, message),
    }
}

fn remote_message(body: &str) -> Option<String> {
    let parsed: RemoteExceptionResponse = serde_json::from_str(body).ok()?;
    let remote = parsed.remote_exception;
    match (remote.message, remote.exception) {
        (Some(m), _) if !m.is_empty() => Some(m),
        (_, Some(e)) => Some(e),
        _ => None,
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unexpected HTTP status",
    }
}
