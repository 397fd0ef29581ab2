//! Calibration errors

use std::io;
use std::path::PathBuf;

/// Errors surfaced by a calibration session and its persistence.
///
/// Events that arrive in the wrong phase are not errors; they are ignored.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("No joystick available for configuration")]
    NoDeviceAvailable,

    #[error("Failed to write input config to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read input config from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Discriminant of [`CalibrationError`], for callers that only branch on
/// the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoDeviceAvailable,
    IoWriteFailure,
    IoReadFailure,
    Parse,
}

impl CalibrationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalibrationError::NoDeviceAvailable => ErrorKind::NoDeviceAvailable,
            CalibrationError::Write { .. } => ErrorKind::IoWriteFailure,
            CalibrationError::Read { .. } => ErrorKind::IoReadFailure,
            CalibrationError::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CalibrationError::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type for calibration operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;
