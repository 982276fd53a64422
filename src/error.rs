use std::path::Path;

use thiserror::Error;

/// Main error type for cuttle operations
#[derive(Error, Debug)]
pub enum CuttleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad index file {file}: {reason}")]
    Format { file: String, reason: String },

    #[error("Cannot open manifest {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for cuttle operations
pub type Result<T> = std::result::Result<T, CuttleError>;

impl CuttleError {
    /// A format violation (wrong magic, version, or truncated layout) in `file`.
    pub fn format(file: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        CuttleError::Format {
            file: file.as_ref().display().to_string(),
            reason: reason.into(),
        }
    }

    /// Failure to open the manifest at `path`.
    pub fn manifest(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        CuttleError::Manifest {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
