//! Error types for the scoring engine

use thiserror::Error;

/// Errors that can occur while driving a session
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Speech recognition is not supported on this platform")]
    RecognitionUnsupported,

    #[error("Speech recognition error: {0}")]
    Recognition(String),

    #[error("Invalid session transition: cannot {op} while {phase}")]
    InvalidTransition {
        op: &'static str,
        phase: &'static str,
    },

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    PersistenceError(String),
}
