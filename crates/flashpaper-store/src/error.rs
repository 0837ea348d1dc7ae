//! Error types for store operations

use flashpaper_cipher::CipherError;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad input shape or values (non-positive max_views or ttl, empty content)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The snippet does not exist, or is not owned by the caller
    #[error("Snippet not found")]
    NotFound,

    /// The snippet is past its expiry
    #[error("Snippet expired")]
    Expired,

    /// The snippet has reached its view ceiling
    #[error("Snippet burnt")]
    Burnt,

    /// Transaction or persistence fault
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The view was consumed but the content could not be opened
    #[error("Decryption error: {0}")]
    Decryption(CipherError),

    /// Sealing new content failed
    #[error("Encryption error: {0}")]
    Encryption(CipherError),

    /// Missing or malformed secret key
    #[error("Configuration error: {0}")]
    Configuration(CipherError),

    /// A persisted row could not be mapped back to a snippet
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Whether this is one of the outcomes presented to readers as "unavailable"
    ///
    /// Expired, burnt and not-found are deliberately indistinguishable outside
    /// the core.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound | StoreError::Expired | StoreError::Burnt
        )
    }
}

impl From<CipherError> for StoreError {
    fn from(err: CipherError) -> Self {
        match err {
            CipherError::Configuration(_) => StoreError::Configuration(err),
            CipherError::Encryption(_) => StoreError::Encryption(err),
            CipherError::Tampered(_) => StoreError::Decryption(err),
        }
    }
}
