//! Error types for the subscription transport codec

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while encoding client messages
///
/// Decoding never fails: malformed server input becomes
/// [`ServerMessage::Unsupported`](crate::ServerMessage::Unsupported) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation's variables could not be projected to a JSON object
    #[error("Variable projection failed: {0}")]
    Variables(String),

    /// The document had to be sent but the operation does not carry one
    #[error("Operation {operation} has no document to send")]
    MissingDocument { operation: String },

    /// Any other collaborator error
    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Variables(_) => "VARIABLES_ERROR",
            Error::MissingDocument { .. } => "MISSING_DOCUMENT",
            Error::Other(_) => "UNKNOWN_ERROR",
        }
    }
}
