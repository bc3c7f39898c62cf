use crate::api::ApiError;
use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Errors that can occur while starting or running the TUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}
