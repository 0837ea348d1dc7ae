//! Error types for cipher operations
//!
//! Key material is never included in error messages.

use thiserror::Error;

/// Errors that can occur while sealing or opening snippet content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The key is absent or not exactly 32 bytes
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The AEAD failed to seal the plaintext
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// The blob is truncated, malformed or fails authentication
    #[error("Ciphertext rejected: {0}")]
    Tampered(String),
}

/// Result alias for cipher operations
pub type Result<T> = std::result::Result<T, CipherError>;
