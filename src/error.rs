//! Error types for linetint

use thiserror::Error;

/// Result type alias for linetint operations
pub type Result<T> = std::result::Result<T, TintError>;

/// Top-level error type
///
/// The scanning engine itself never fails; errors only arise at the
/// host layer (file I/O, configuration, language lookup).
#[derive(Error, Debug)]
pub enum TintError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}
