//! Error types for chlens

use thiserror::Error;

/// Core error type for chlens operations
///
/// The splitter and plan parser are total and never produce one of these;
/// errors only come from reading configuration and decoding caller input.
#[derive(Error, Debug)]
pub enum ChlensError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for chlens operations
pub type Result<T> = std::result::Result<T, ChlensError>;
