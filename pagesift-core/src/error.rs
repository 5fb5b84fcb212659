use std::path::PathBuf;
use thiserror::Error;

/// Result type for split pipeline operations
pub type SplitResult<T> = std::result::Result<T, SplitError>;

/// Errors surfaced by the split pipeline
#[derive(Error, Debug)]
pub enum SplitError {
    /// Source document could not be opened or parsed
    #[error("Failed to load document: {0}")]
    LoadFailure(String),

    /// Output directory could not be created
    #[error("Failed to create output directory {}: {source}", path.display())]
    DirectoryCreationFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A single chunk failed to persist
    #[error("Failed to write {}: {reason}", path.display())]
    PageWriteFailure { path: PathBuf, reason: String },

    /// Configuration rejected before the run starts
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Run aborted between chunk writes
    #[error("Split cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_non_empty() {
        let errors = vec![
            SplitError::LoadFailure("corrupt xref".to_string()),
            SplitError::DirectoryCreationFailure {
                path: PathBuf::from("/no/such/dir"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            },
            SplitError::PageWriteFailure {
                path: PathBuf::from("out_001.pdf"),
                reason: "disk full".to_string(),
            },
            SplitError::InvalidConfiguration("pages per chunk must be positive".to_string()),
            SplitError::Cancelled,
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SplitError = io.into();
        assert!(matches!(err, SplitError::Io(_)));
    }
}
