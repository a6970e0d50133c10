//! RSA key material for token signing and verification

use std::fs;

use jsonwebtoken::{DecodingKey, EncodingKey};
use signet_shared::TokenConfig;

use crate::errors::TokenError;

/// Holds the optional RSA key pair used by the token service
///
/// Either key may be absent: an issuer deployment carries only the
/// private key, a verifier only the public key. A missing key disables
/// the corresponding operation; the error surfaces when that operation
/// is invoked, not at construction time.
#[derive(Clone)]
pub struct TokenKeys {
    /// Private key for signing, when configured
    encoding_key: Option<EncodingKey>,
    /// Public key for verification, when configured
    decoding_key: Option<DecodingKey>,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("encoding_key", &self.encoding_key.as_ref().map(|_| "<private key>"))
            .field("decoding_key", &self.decoding_key.as_ref().map(|_| "<public key>"))
            .finish()
    }
}

impl TokenKeys {
    /// Loads key material from the paths named in the configuration
    ///
    /// A path that is not configured leaves the corresponding key
    /// absent. A configured path that cannot be read or does not parse
    /// as a PEM-encoded RSA key fails immediately with
    /// `TokenError::Configuration`.
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        let encoding_key = match &config.private_key_path {
            Some(path) => Some(Self::load_encoding_key(path)?),
            None => None,
        };

        let decoding_key = match &config.public_key_path {
            Some(path) => Some(Self::load_decoding_key(path)?),
            None => None,
        };

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Builds key material from in-memory PEM strings
    ///
    /// Useful for tests and for deployments that embed their keys.
    pub fn from_pem(
        private_key_pem: Option<&str>,
        public_key_pem: Option<&str>,
    ) -> Result<Self, TokenError> {
        let encoding_key = private_key_pem
            .map(|pem| {
                EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| TokenError::Configuration {
                    message: format!("invalid private key format: {}", e),
                })
            })
            .transpose()?;

        let decoding_key = public_key_pem
            .map(|pem| {
                DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| TokenError::Configuration {
                    message: format!("invalid public key format: {}", e),
                })
            })
            .transpose()?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Returns the signing key, if configured
    pub fn encoding_key(&self) -> Option<&EncodingKey> {
        self.encoding_key.as_ref()
    }

    /// Returns the verification key, if configured
    pub fn decoding_key(&self) -> Option<&DecodingKey> {
        self.decoding_key.as_ref()
    }

    fn load_encoding_key(path: &str) -> Result<EncodingKey, TokenError> {
        let pem = fs::read(path).map_err(|e| TokenError::Configuration {
            message: format!("failed to read private key {}: {}", path, e),
        })?;

        EncodingKey::from_rsa_pem(&pem).map_err(|e| TokenError::Configuration {
            message: format!("invalid private key format: {}", e),
        })
    }

    fn load_decoding_key(path: &str) -> Result<DecodingKey, TokenError> {
        let pem = fs::read(path).map_err(|e| TokenError::Configuration {
            message: format!("failed to read public key {}: {}", path, e),
        })?;

        DecodingKey::from_rsa_pem(&pem).map_err(|e| TokenError::Configuration {
            message: format!("invalid public key format: {}", e),
        })
    }
}
