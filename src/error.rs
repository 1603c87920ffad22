// Error type shared by the library modules
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    /// Nothing usable is selected, or the object is not a camera.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Parameters that cannot produce a trajectory (e.g. a non-positive frame rate).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operation was requested in a state that does not allow it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A preset, scene or registry file could not be read or written.
    #[error("could not {action} {}: {source}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("RON syntax error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LaunchError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        LaunchError::InvalidConfiguration(message.into())
    }

    pub(crate) fn file(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        LaunchError::File {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn selection(message: impl Into<String>) -> Self {
        LaunchError::InvalidSelection(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
