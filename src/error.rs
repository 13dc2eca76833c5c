//! Error types for supaconf
//!
//! This module defines the error hierarchy used throughout the library.
//! We use `thiserror` for library-style errors that are part of the API.
//! All variants are produced synchronously at load time; none are retried.
//!
//! The anon key value must never appear in any of these errors. Variants
//! that report on the credential carry a reason, not the value.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A mandatory field (`url`, `anonKey`) is absent from the source.
    ///
    /// Mandatory fields never receive defaults; a missing one is fatal.
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The endpoint URL is not a well-formed absolute HTTPS URL.
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The anon key fails shape validation (empty, or contains whitespace).
    ///
    /// Carries only the reason. The key itself is a secret.
    #[error("Invalid credential: {reason}")]
    InvalidCredential { reason: String },

    /// An auth option is present but not boolean-typed.
    #[error("Invalid option {field}: expected a boolean, found {found}")]
    InvalidOption { field: String, found: String },

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message_names_field() {
        let err = ConfigError::MissingField {
            field: "anonKey".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: anonKey");
    }

    #[test]
    fn test_invalid_option_message_reports_found_type() {
        let err = ConfigError::InvalidOption {
            field: "options.auth.autoRefreshToken".to_string(),
            found: "string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("options.auth.autoRefreshToken"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn test_invalid_credential_carries_reason_only() {
        let err = ConfigError::InvalidCredential {
            reason: "key contains whitespace".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credential: key contains whitespace");
    }
}
