//! Error types for keyphrase extraction
//!
//! Only contract violations are errors. Degenerate inputs (no phrases, a
//! single phrase) and quality diagnostics are handled in-band and reported
//! as [`crate::types::ExtractionWarning`]s instead.

use thiserror::Error;

/// Errors that can occur while building documents or running extraction.
#[derive(Debug, Error)]
pub enum KeyphraseError {
    /// The token sequence violates the document contract
    #[error("Malformed input at token {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A linkage method name that the clustering step does not know
    #[error("Unknown linkage method: {0}")]
    UnknownLinkage(String),

    /// Configuration (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl KeyphraseError {
    /// Build a malformed-input error for the token at `position`
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            position,
            reason: reason.into(),
        }
    }

    /// Build an invalid-configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, KeyphraseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = KeyphraseError::malformed(3, "empty surface form");
        assert_eq!(
            err.to_string(),
            "Malformed input at token 3: empty surface form"
        );
    }

    #[test]
    fn test_serialization_from() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: KeyphraseError = json_err.into();
        assert!(matches!(err, KeyphraseError::Serialization(_)));
    }
}
