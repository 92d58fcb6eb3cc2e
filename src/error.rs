//! Error types for escriba.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscribaError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio errors
    #[error("Failed to read audio '{path}': {message}")]
    AudioRead { path: String, message: String },

    #[error("Failed to write audio chunk '{path}': {message}")]
    ChunkWrite { path: String, message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Text processing errors
    #[error("Failed to load dictionary '{path}': {message}")]
    Dictionary { path: String, message: String },

    #[error("Unsupported language: {language}")]
    UnsupportedLanguage { language: String },

    // Report errors
    #[error("Report write failed: {message}")]
    Report { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, EscribaError>;
