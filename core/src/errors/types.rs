//! Error type definitions for token and service-wiring operations
//!
//! Every variant names the check that failed so callers can log the
//! failure without reproducing signed material. A malformed or forged
//! token is an expected input: nothing in this module panics, and no
//! failure is retried internally.

use thiserror::Error;

/// Token issuing and verification errors
#[derive(Error, Debug)]
pub enum TokenError {
    /// Key material was configured but could not be read or parsed
    #[error("invalid key material: {message}")]
    Configuration { message: String },

    /// `create_token` called without a private key configured
    #[error("signing disabled: no private key configured")]
    SigningDisabled,

    /// `parse_token` called without a public key configured
    #[error("verification disabled: no public key configured")]
    VerificationDisabled,

    /// Subject-id obfuscation failed on the issuing side
    #[error("subject encoding failed: {message}")]
    Encoding { message: String },

    /// Subject-id could not be decoded back to a user id
    #[error("subject decoding failed: {message}")]
    Decoding { message: String },

    /// Signature computation failed
    #[error("token signing failed: {message}")]
    Signing { message: String },

    /// Token is not a structurally valid three-segment JWS
    #[error("malformed token")]
    Malformed,

    /// Signature mismatch or unsupported signing algorithm
    #[error("signature verification failed")]
    InvalidSignature,

    /// Token expired (beyond the documented leeway)
    #[error("token expired")]
    Expired,

    /// Audience claim does not match the verifier configuration
    #[error("audience mismatch")]
    AudienceMismatch,

    /// Issuer claim does not match the verifier configuration
    #[error("issuer mismatch")]
    IssuerMismatch,

    /// Payload claim absent from an otherwise valid token
    #[error("payload claim missing")]
    MissingPayload,
}

/// Errors surfaced by collaborator services behind the registry seams
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("database error: {message}")]
    Database { message: String },

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("service unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors raised while assembling the service registry at startup
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A required capability was never supplied to the builder
    #[error("missing service: {name}")]
    MissingService { name: &'static str },

    /// A service factory failed during startup construction
    #[error("failed to construct service {name}")]
    Construction {
        name: &'static str,
        #[source]
        source: ServiceError,
    },
}

impl RegistryError {
    /// Tag a construction failure with the capability being built
    pub fn construction(name: &'static str, source: ServiceError) -> Self {
        Self::Construction { name, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_token_error_names_failing_check() {
        assert_eq!(TokenError::Expired.to_string(), "token expired");
        assert_eq!(TokenError::AudienceMismatch.to_string(), "audience mismatch");

        let err = TokenError::Decoding {
            message: "checksum mismatch".to_string(),
        };
        assert!(err.to_string().contains("checksum mismatch"));
    }

    #[test]
    fn test_registry_error_names_capability() {
        let err = RegistryError::construction(
            "user",
            ServiceError::Database {
                message: "connection refused".to_string(),
            },
        );
        assert_eq!(err.to_string(), "failed to construct service user");

        let missing = RegistryError::MissingService { name: "order" };
        assert_eq!(missing.to_string(), "missing service: order");
    }

    #[test]
    fn test_domain_error_bridges_are_transparent() {
        let err: DomainError = TokenError::InvalidSignature.into();
        assert_eq!(err.to_string(), "signature verification failed");

        let err: DomainError = ServiceError::NotFound.into();
        assert_eq!(err.to_string(), "not found");
    }
}
