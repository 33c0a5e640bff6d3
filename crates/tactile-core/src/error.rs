use thiserror::Error;

/// Top-level error type for the Tactile system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates return
/// this type directly so the `?` operator works across crate boundaries.
/// The braille transliteration functions are total and never produce an
/// error; this enum serves configuration I/O and the voice subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TactileError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Voice navigation error: {0}")]
    Voice(String),

    #[error("Speech recognizer error: {0}")]
    Recognizer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for TactileError {
    fn from(err: toml::de::Error) -> Self {
        TactileError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TactileError {
    fn from(err: toml::ser::Error) -> Self {
        TactileError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TactileError {
    fn from(err: serde_json::Error) -> Self {
        TactileError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Tactile operations.
pub type Result<T> = std::result::Result<T, TactileError>;
