use thiserror::Error;

/// contribheat error types
#[derive(Error, Debug)]
pub enum ContribheatError {
    /// Transport failure (DNS, connect, timeout, body read)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Endpoint answered with a non-success status
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    /// Response body was not the expected calendar shape
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for contribheat
pub type Result<T> = std::result::Result<T, ContribheatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContribheatError::Parse("missing field `weeks`".into());
        assert_eq!(err.to_string(), "parse error: missing field `weeks`");
    }

    #[test]
    fn test_status_display() {
        let err = ContribheatError::Status(500);
        assert_eq!(err.to_string(), "unexpected HTTP status: 500");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ContribheatError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
