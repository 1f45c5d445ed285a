/*
 * Error type shared by the layout engine, the state persistence layer and the
 * platform hosts. The taxonomy is intentionally narrow: platform queries that
 * fail, I/O on the persisted layout document, and documents that cannot be
 * decoded. Conditions such as a stale control count or a missing state file
 * are not errors and never surface here.
 */
use std::fmt;

#[derive(Debug)]
pub enum PlatformError {
    /// A native handle or logical control id could not be resolved.
    InvalidHandle(String),
    /// A platform query or mutation reported failure.
    OperationFailed(String),
    /// Reading or writing the persisted layout failed.
    Io(std::io::Error),
    /// The persisted layout document is malformed.
    Decode(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            PlatformError::Io(err) => write!(f, "I/O error: {err}"),
            PlatformError::Decode(msg) => write!(f, "malformed layout state: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlatformError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(err: std::io::Error) -> Self {
        PlatformError::Io(err)
    }
}

impl From<serde_json::Error> for PlatformError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            PlatformError::Io(err.into())
        } else {
            PlatformError::Decode(err.to_string())
        }
    }
}
