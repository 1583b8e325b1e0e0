//! Error types for the Wikigraph core library.

use thiserror::Error;

/// All errors that can occur within the Wikigraph core library.
///
/// Graph queries never produce these: a missing focal note or an
/// unresolvable link yields an empty result instead. Errors only surface
/// at the configuration boundary and from strict lookups.
#[derive(Debug, Error)]
pub enum WikigraphError {
    /// A note ID was requested that is not part of the current collection.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Graph settings failed validation.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`WikigraphError`].
pub type Result<T> = std::result::Result<T, WikigraphError>;

impl WikigraphError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidSettings(msg) => format!("Graph settings are invalid: {msg}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
