//! Error types for the knowflow host.

use knowflow_search::SearchError;

/// Top-level error type for the knowflow host.
#[derive(Debug, thiserror::Error)]
pub enum KnowflowError {
    /// Configuration could not be parsed or is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Error raised by the search core.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Host protocol channel error (stdin/stdout).
    #[error("channel error: {0}")]
    Channel(String),
}

/// Convenience type alias for knowflow results.
pub type Result<T> = std::result::Result<T, KnowflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_pass_through_transparently() {
        let err: KnowflowError = SearchError::DuplicateSource("docs".into()).into();
        assert_eq!(
            err.to_string(),
            "duplicate source: a source with id \"docs\" is already registered"
        );
    }

    #[test]
    fn display_config() {
        let err = KnowflowError::Config("default_limit must be > 0".into());
        assert_eq!(err.to_string(), "config error: default_limit must be > 0");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: KnowflowError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
