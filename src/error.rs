//! Centralized error types for tagbox.
//!
//! The tag input itself never fails; errors come from loading configuration
//! and from driving the terminal.

use thiserror::Error;

use crate::config::ConfigError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// IO errors (suggestion files, terminal writes).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup or teardown errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic errors with a message.
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Create a generic error.
    pub fn other(msg: impl Into<String>) -> Self {
        AppError::Other(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Use --config to pass a file."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
            AppError::Other(msg) => msg.clone(),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_user_message_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "duplicate suggestion 'Red'".to_string(),
        ));
        assert!(err.user_message().contains("duplicate suggestion 'Red'"));
    }

    #[test]
    fn test_user_message_no_config_dir() {
        let err = AppError::Config(ConfigError::NoConfigDir);
        assert!(err.user_message().contains("--config"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode unavailable");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: raw mode unavailable");
    }

    #[test]
    fn test_other_error() {
        let err = AppError::other("something went wrong");
        assert_eq!(err.user_message(), "something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
