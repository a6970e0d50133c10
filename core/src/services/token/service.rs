//! Main token service implementation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::debug;

use signet_shared::TokenConfig;

use crate::domain::entities::token::{Claims, ParsedIdentity, EXPIRY_LEEWAY_SECONDS};
use crate::errors::TokenError;

use super::codec::SubjectCodec;
use super::key_manager::TokenKeys;

/// Service for issuing and verifying signed identity tokens
///
/// Holds the immutable configuration, the optional RSA key pair and the
/// optional subject-id codec for the lifetime of the process. Both
/// operations are pure functions of their input and this state, so a
/// single instance is safe to share across any number of tasks without
/// synchronization.
pub struct TokenService {
    config: TokenConfig,
    keys: TokenKeys,
    codec: Option<SubjectCodec>,
    validation: Validation,
}

impl TokenService {
    /// Creates a token service, loading key material from the paths
    /// named in the configuration
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` when a configured key file
    /// cannot be read or parsed. Absent key paths are not an error;
    /// they disable the corresponding operation.
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        let keys = TokenKeys::from_config(&config)?;
        Ok(Self::with_keys(config, keys))
    }

    /// Creates a token service from already-loaded key material
    pub fn with_keys(config: TokenConfig, keys: TokenKeys) -> Self {
        let codec = config
            .obfuscation_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .map(SubjectCodec::new);

        // Signature checking stays inside jsonwebtoken; expiry, audience
        // and issuer are gated manually below so each failure maps to a
        // distinct error instead of one collapsed validation error.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            config,
            keys,
            codec,
            validation,
        }
    }

    /// Issues a signed token carrying the user id and an opaque payload
    ///
    /// The subject id is the obfuscated form of `user_id` when an
    /// obfuscation secret is configured, and the plain decimal form
    /// otherwise. Expiry is the configured lifetime from now.
    ///
    /// # Errors
    ///
    /// * `TokenError::SigningDisabled` - no private key configured
    /// * `TokenError::Encoding` - negative id or codec failure
    /// * `TokenError::Signing` - RSA signing failed
    pub fn create_token(&self, user_id: i64, payload: &str) -> Result<String, TokenError> {
        let encoding_key = self.keys.encoding_key().ok_or(TokenError::SigningDisabled)?;

        let subject_id = self.encode_subject(user_id)?;
        let claims = Claims::new(
            subject_id,
            payload.to_string(),
            self.config.audience.clone(),
            self.config.issuer.clone(),
            self.config.lifetime_seconds,
        );

        let token = encode(&Header::new(Algorithm::RS256), &claims, encoding_key)
            .map_err(|e| TokenError::Signing {
                message: e.to_string(),
            })?;

        debug!(user_id, "issued identity token");
        Ok(token)
    }

    /// Verifies a token and recovers the identity it carries
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// structure, signature, expiry (with `EXPIRY_LEEWAY_SECONDS` of
    /// clock skew), audience, issuer, subject decoding, payload
    /// presence.
    ///
    /// # Errors
    ///
    /// * `TokenError::VerificationDisabled` - no public key configured
    /// * `TokenError::Malformed` - not a decodable three-segment token
    /// * `TokenError::InvalidSignature` - bad signature or algorithm
    /// * `TokenError::Expired` - past `exp` beyond the leeway
    /// * `TokenError::AudienceMismatch` / `TokenError::IssuerMismatch`
    /// * `TokenError::Decoding` - subject id not recoverable
    /// * `TokenError::MissingPayload` - payload claim absent
    pub fn parse_token(&self, token: &str) -> Result<ParsedIdentity, TokenError> {
        let decoding_key = self
            .keys
            .decoding_key()
            .ok_or(TokenError::VerificationDisabled)?;

        check_structure(token)?;

        let data = decode::<Claims>(token, decoding_key, &self.validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName
                | ErrorKind::InvalidKeyFormat
                | ErrorKind::Crypto(_) => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;
        let claims = data.claims;

        if claims.is_expired(EXPIRY_LEEWAY_SECONDS) {
            debug!("token rejected: expired");
            return Err(TokenError::Expired);
        }
        if claims.aud != self.config.audience {
            debug!("token rejected: audience mismatch");
            return Err(TokenError::AudienceMismatch);
        }
        if claims.iss != self.config.issuer {
            debug!("token rejected: issuer mismatch");
            return Err(TokenError::IssuerMismatch);
        }

        let subject_id = claims.jti.ok_or_else(|| TokenError::Decoding {
            message: "subject claim missing".to_string(),
        })?;
        let user_id = self.decode_subject(&subject_id)?;

        let payload = claims.sub.ok_or(TokenError::MissingPayload)?;

        debug!(user_id, "verified identity token");
        Ok(ParsedIdentity { user_id, payload })
    }

    fn encode_subject(&self, user_id: i64) -> Result<String, TokenError> {
        if user_id < 0 {
            return Err(TokenError::Encoding {
                message: "user id must be non-negative".to_string(),
            });
        }

        match &self.codec {
            Some(codec) => codec.encode(user_id),
            None => Ok(user_id.to_string()),
        }
    }

    fn decode_subject(&self, subject_id: &str) -> Result<i64, TokenError> {
        match &self.codec {
            Some(codec) => codec.decode(subject_id),
            None => subject_id.parse().map_err(|_| TokenError::Decoding {
                message: "subject is not a decimal id".to_string(),
            }),
        }
    }
}

/// Structural gate: the token must be three dot-separated base64url
/// segments with an RS256 header
///
/// Runs before signature verification so a garbage string is reported
/// as malformed rather than as a signature failure. A header declaring
/// any other algorithm, including `none`, is rejected as an invalid
/// signature.
fn check_structure(token: &str) -> Result<(), TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Malformed);
    }

    let header = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|_| TokenError::Malformed)?;
    URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|_| TokenError::Malformed)?;
    URL_SAFE_NO_PAD
        .decode(segments[2])
        .map_err(|_| TokenError::Malformed)?;

    let header: serde_json::Value =
        serde_json::from_slice(&header).map_err(|_| TokenError::Malformed)?;
    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some("RS256") => Ok(()),
        _ => Err(TokenError::InvalidSignature),
    }
}
