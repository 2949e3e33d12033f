use std::path::PathBuf;
use std::time::Duration;

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Validation,
    NotFound,
    Generic,
}

#[derive(Debug, thiserror::Error)]
pub enum SingleKeyError {
    #[error("{0}")]
    Authentication(String),
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<String>,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Client(String),
    #[error("timeout waiting for report after {waited:?}")]
    ReportTimeout { waited: Duration },
    #[error("unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SingleKeyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SingleKeyError::Authentication(_) => ErrorKind::Authentication,
            SingleKeyError::Validation { .. } => ErrorKind::Validation,
            SingleKeyError::NotFound(_) => ErrorKind::NotFound,
            SingleKeyError::Client(_)
            | SingleKeyError::ReportTimeout { .. }
            | SingleKeyError::Io { .. } => ErrorKind::Generic,
        }
    }

    /// Field-level errors reported by the API; empty unless this is a validation failure.
    pub fn errors(&self) -> &[String] {
        match self {
            SingleKeyError::Validation { errors, .. } => errors,
            _ => &[],
        }
    }

    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SingleKeyError::Client("request timed out".to_string())
        } else if err.is_connect() {
            SingleKeyError::Client("connection failed".to_string())
        } else {
            SingleKeyError::Client(format!("request failed: {err}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, SingleKeyError>;
