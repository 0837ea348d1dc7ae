//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The snippet is expired, burnt or does not exist
    #[error("snippet is unavailable")]
    Unavailable,

    /// Nothing matched the requested id and owner
    #[error("{0} not found")]
    NotFound(String),

    /// Store error
    #[error(transparent)]
    Store(flashpaper_store::StoreError),

    /// Cipher error
    #[error(transparent)]
    Cipher(#[from] flashpaper_cipher::CipherError),

    /// Janitor error
    #[error(transparent)]
    Janitor(#[from] flashpaper_janitor::JanitorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<flashpaper_store::StoreError> for CliError {
    fn from(err: flashpaper_store::StoreError) -> Self {
        // Readers never learn which of the three cases occurred.
        if err.is_unavailable() {
            CliError::Unavailable
        } else {
            CliError::Store(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashpaper_store::StoreError;

    #[test]
    fn test_unavailable_outcomes_are_merged() {
        for err in [StoreError::NotFound, StoreError::Expired, StoreError::Burnt] {
            let cli: CliError = err.into();
            assert!(matches!(cli, CliError::Unavailable));
            assert_eq!(cli.to_string(), "snippet is unavailable");
        }
    }

    #[test]
    fn test_other_store_errors_pass_through() {
        let cli: CliError = StoreError::Validation("max_views must be greater than zero".into()).into();
        assert!(matches!(cli, CliError::Store(StoreError::Validation(_))));
        assert!(cli.to_string().contains("max_views"));
    }
}
