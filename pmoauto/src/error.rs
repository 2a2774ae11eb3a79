//! Types d'erreurs pour pmoauto

use pmomedialib::LibraryError;
use thiserror::Error;

/// Errors returned by [`AutoService`](crate::AutoService) and its helpers.
#[derive(Debug, Error)]
pub enum AutoError {
    #[error("Library rejected: {0}")]
    Library(#[from] LibraryError),

    #[error("Invalid player state: {0}")]
    InvalidPlayerState(#[from] serde_json::Error),

    #[error("Artwork fetch failed for {url}: {reason}")]
    Artwork { url: String, reason: String },

    #[error("Artwork fetch timed out for {url}")]
    ArtworkTimeout { url: String },

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl AutoError {
    pub fn artwork(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Artwork {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for pmoauto operations
pub type Result<T> = std::result::Result<T, AutoError>;
