use thiserror::Error;

/// bookdesk error types
#[derive(Error, Debug)]
pub enum BookdeskError {
    /// Failed to parse JSON input
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Document store could not serve a page
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Value could not be rendered for display
    #[error("format error: {0}")]
    Format(String),
}

/// Result type alias for bookdesk
pub type Result<T> = std::result::Result<T, BookdeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookdeskError::Parse("invalid json".into());
        assert_eq!(err.to_string(), "parse error: invalid json");
    }

    #[test]
    fn test_format_error_display() {
        let err = BookdeskError::Format("invalid currency code 'rupees'".into());
        assert_eq!(
            err.to_string(),
            "format error: invalid currency code 'rupees'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BookdeskError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
