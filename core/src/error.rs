//! Error types for the codescanner-core library.

use thiserror::Error;

use crate::domain::ReadStage;

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a scanner driver.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The driver refused the request.
    #[error("Driver rejected request: {0}")]
    Rejected(String),

    /// No scan data is waiting in the driver buffer.
    #[error("Driver buffer is empty")]
    BufferEmpty,

    /// The driver handle has already been released.
    #[error("Driver handle has been released")]
    Disposed,

    /// I/O error from the underlying device.
    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while operating the scanner adapter.
#[derive(Error, Debug)]
pub enum Error {
    /// The driver refused to open the port.
    #[error("Port open failed: {source}")]
    PortOpenFailed {
        #[source]
        source: DriverError,
    },

    /// The driver refused to close the port.
    #[error("Port close failed: {source}")]
    PortCloseFailed {
        #[source]
        source: DriverError,
    },

    /// Enable requested while the port is open.
    #[error("Port is already open")]
    AlreadyOpen,

    /// Disable requested while the port is closed.
    #[error("Port is already closed")]
    AlreadyClosed,

    /// Reading the code type from the driver buffer failed.
    #[error("Unable to get code type: {source}")]
    UnableToGetType {
        #[source]
        source: DriverError,
    },

    /// Reading the code length from the driver buffer failed.
    #[error("Unable to get code length: {source}")]
    UnableToGetLength {
        #[source]
        source: DriverError,
    },

    /// Reading the code content from the driver buffer failed.
    #[error("Unable to get code content: {source}")]
    UnableToGetContent {
        #[source]
        source: DriverError,
    },

    /// The driver signalled completion after the adapter was dropped.
    #[error("Scanner adapter has been released")]
    ScannerReleased,

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The buffer-read stage this error came from, if any.
    pub fn read_stage(&self) -> Option<ReadStage> {
        match self {
            Error::UnableToGetType { .. } => Some(ReadStage::Type),
            Error::UnableToGetLength { .. } => Some(ReadStage::Length),
            Error::UnableToGetContent { .. } => Some(ReadStage::Content),
            _ => None,
        }
    }

    /// Whether this is an `AlreadyOpen` / `AlreadyClosed` state conflict
    /// rather than a driver failure.
    pub fn is_state_conflict(&self) -> bool {
        matches!(self, Error::AlreadyOpen | Error::AlreadyClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_read_stage_mapping() {
        let err = Error::UnableToGetLength {
            source: DriverError::BufferEmpty,
        };
        assert_eq!(err.read_stage(), Some(ReadStage::Length));
        assert!(!err.is_state_conflict());
        assert_eq!(Error::AlreadyOpen.read_stage(), None);
    }

    #[test]
    fn test_state_conflicts() {
        assert!(Error::AlreadyOpen.is_state_conflict());
        assert!(Error::AlreadyClosed.is_state_conflict());
        let err = Error::PortOpenFailed {
            source: DriverError::Disposed,
        };
        assert!(!err.is_state_conflict());
    }

    #[test]
    fn test_source_is_preserved() {
        let err = Error::PortCloseFailed {
            source: DriverError::Rejected("busy".to_string()),
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("Driver rejected request: busy"));
        assert_eq!(
            err.to_string(),
            "Port close failed: Driver rejected request: busy"
        );
    }
}
