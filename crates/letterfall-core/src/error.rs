//! Error types for Letterfall

use crate::id::LetterId;
use thiserror::Error;

/// The main error type for Letterfall operations
#[derive(Debug, Error)]
pub enum LetterfallError {
    /// The display surface could not be acquired. Fatal to the sandbox.
    #[error("Initialization failure: {0}")]
    InitializationFailure(String),

    /// A letter's physics handle was queried after the body was removed.
    #[error("Stale physics handle for letter {0}")]
    StaleHandle(LetterId),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

impl LetterfallError {
    /// Errors the frame loop absorbs instead of surfacing
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LetterfallError::StaleHandle(_))
    }
}

/// Result type alias for Letterfall operations
pub type Result<T> = std::result::Result<T, LetterfallError>;

impl From<toml::de::Error> for LetterfallError {
    fn from(err: toml::de::Error) -> Self {
        LetterfallError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for LetterfallError {
    fn from(err: toml::ser::Error) -> Self {
        LetterfallError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_handle_is_recoverable() {
        let err = LetterfallError::StaleHandle(LetterId::from_raw(3));
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Stale physics handle for letter 3");
    }

    #[test]
    fn init_failure_is_fatal() {
        let err = LetterfallError::InitializationFailure("no window".into());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn out_of_range_message() {
        let err = LetterfallError::ValueOutOfRange {
            field: "sling.radius".into(),
            min: 0.0,
            max: f64::MAX,
            value: -1.0,
        };
        assert!(err.to_string().starts_with("Value out of range: sling.radius"));
    }
}
