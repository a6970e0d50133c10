//! Identity token configuration

use serde::{Deserialize, Serialize};

/// Configuration for issuing and verifying signed identity tokens
///
/// A deployment may carry only one of the two key paths: an issuer
/// configures the private key, a verifier the public key. A missing
/// path disables the corresponding operation instead of failing at
/// construction time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Audience claim stamped into issued tokens and required on parse
    pub audience: String,

    /// Issuer claim stamped into issued tokens and required on parse
    pub issuer: String,

    /// Token lifetime in seconds
    pub lifetime_seconds: i64,

    /// Path to the PEM-encoded RSA public key (verifier role)
    #[serde(default)]
    pub public_key_path: Option<String>,

    /// Path to the PEM-encoded RSA private key (issuer role)
    #[serde(default)]
    pub private_key_path: Option<String>,

    /// Secret for the reversible subject-id obfuscation codec.
    /// When absent, subject ids travel in plain decimal form.
    #[serde(default)]
    pub obfuscation_secret: Option<String>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            audience: String::from("signet-app"),
            issuer: String::from("signet"),
            lifetime_seconds: 3600, // 1 hour
            public_key_path: None,
            private_key_path: None,
            obfuscation_secret: None,
        }
    }
}

impl TokenConfig {
    /// Create a new token configuration for the given audience and issuer
    pub fn new(audience: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            issuer: issuer.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in seconds
    pub fn with_lifetime_seconds(mut self, seconds: i64) -> Self {
        self.lifetime_seconds = seconds;
        self
    }

    /// Set the PEM public key path (enables verification)
    pub fn with_public_key_path(mut self, path: impl Into<String>) -> Self {
        self.public_key_path = Some(path.into());
        self
    }

    /// Set the PEM private key path (enables signing)
    pub fn with_private_key_path(mut self, path: impl Into<String>) -> Self {
        self.private_key_path = Some(path.into());
        self
    }

    /// Set the subject-id obfuscation secret
    pub fn with_obfuscation_secret(mut self, secret: impl Into<String>) -> Self {
        self.obfuscation_secret = Some(secret.into());
        self
    }

    /// Create from environment variables
    ///
    /// Reads `TOKEN_AUDIENCE`, `TOKEN_ISSUER`, `TOKEN_LIFETIME_SECONDS`,
    /// `TOKEN_PUBLIC_KEY_PATH`, `TOKEN_PRIVATE_KEY_PATH` and
    /// `TOKEN_OBFUSCATION_SECRET`, falling back to defaults for any
    /// variable that is unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            audience: std::env::var("TOKEN_AUDIENCE").unwrap_or(defaults.audience),
            issuer: std::env::var("TOKEN_ISSUER").unwrap_or(defaults.issuer),
            lifetime_seconds: std::env::var("TOKEN_LIFETIME_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lifetime_seconds),
            public_key_path: std::env::var("TOKEN_PUBLIC_KEY_PATH").ok(),
            private_key_path: std::env::var("TOKEN_PRIVATE_KEY_PATH").ok(),
            obfuscation_secret: std::env::var("TOKEN_OBFUSCATION_SECRET").ok(),
        }
    }

    /// Whether this configuration can issue tokens
    pub fn can_sign(&self) -> bool {
        self.private_key_path.is_some()
    }

    /// Whether this configuration can verify tokens
    pub fn can_verify(&self) -> bool {
        self.public_key_path.is_some()
    }
}
