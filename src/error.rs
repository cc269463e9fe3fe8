use thiserror::Error;

/// Unified error type for pr-changelog operations
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("History retrieval failed: {0}")]
    Retrieval(String),

    #[error("Comment publishing failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in pr-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

impl ChangelogError {
    /// Create a retrieval error with context
    pub fn retrieval(msg: impl Into<String>) -> Self {
        ChangelogError::Retrieval(msg.into())
    }

    /// Create a publish error with context
    pub fn publish(msg: impl Into<String>) -> Self {
        ChangelogError::Publish(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ChangelogError::Version(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChangelogError::retrieval("git log wrote to stderr");
        assert_eq!(
            err.to_string(),
            "History retrieval failed: git log wrote to stderr"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChangelogError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(ChangelogError::publish("test")
            .to_string()
            .contains("publishing"));
        assert!(ChangelogError::version("test")
            .to_string()
            .contains("Version"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ChangelogError::retrieval("x"), "History retrieval failed"),
            (ChangelogError::publish("x"), "Comment publishing failed"),
            (ChangelogError::config("x"), "Configuration error"),
            (ChangelogError::version("x"), "Version parsing error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_empty_messages() {
        let errors = vec![
            ChangelogError::retrieval(""),
            ChangelogError::publish(""),
            ChangelogError::config(""),
        ];

        for err in errors {
            // Even with empty message, the error type prefix should be present
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_multiline_diagnostics() {
        let err = ChangelogError::retrieval("fatal: bad revision\nfatal: ambiguous argument");
        let msg = err.to_string();
        assert!(msg.contains("bad revision"));
        assert!(msg.contains("ambiguous argument"));
    }
}
