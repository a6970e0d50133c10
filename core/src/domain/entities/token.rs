//! Token entities for signed identity tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Tolerated clock skew, in seconds, when comparing the current time
/// against a token's expiry. A token whose `exp` lies no more than this
/// many seconds in the past is still accepted.
pub const EXPIRY_LEEWAY_SECONDS: i64 = 5;

/// Claims structure carried inside a signed token
///
/// Field names follow the registered JWT claim names so tokens
/// interoperate with any standard verifier. The subject id (obfuscated
/// or decimal user id) travels in `jti`; the caller-defined opaque
/// payload travels in `sub`.
///
/// `jti` and `sub` deserialize as options so their absence surfaces as
/// a distinct validation failure rather than a parse error, and
/// `aud`/`iss` default to empty strings so a token missing either claim
/// is reported by the corresponding mismatch gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Audience
    #[serde(default)]
    pub aud: String,

    /// Expiration timestamp (unix seconds)
    pub exp: i64,

    /// Issued at timestamp (unix seconds)
    #[serde(default)]
    pub iat: i64,

    /// Issuer
    #[serde(default)]
    pub iss: String,

    /// Subject id: the obfuscated or decimal form of the user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Opaque, caller-defined payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl Claims {
    /// Creates claims for a freshly issued token
    ///
    /// `exp` is always `iat + lifetime_seconds`, with `iat` taken from
    /// the current clock.
    pub fn new(
        subject_id: String,
        payload: String,
        audience: String,
        issuer: String,
        lifetime_seconds: i64,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            aud: audience,
            exp: now + lifetime_seconds,
            iat: now,
            iss: issuer,
            jti: Some(subject_id),
            sub: Some(payload),
        }
    }

    /// Checks whether the claims have expired, allowing `leeway` seconds
    /// of clock skew
    pub fn is_expired(&self, leeway: i64) -> bool {
        Utc::now().timestamp() > self.exp + leeway
    }
}

/// Result of successfully verifying an identity token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentity {
    /// The numeric user id recovered from the subject claim
    pub user_id: i64,

    /// The opaque payload string carried by the token
    pub payload: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_lifetime() {
        let claims = Claims::new(
            "42".to_string(),
            "session".to_string(),
            "app".to_string(),
            "svc".to_string(),
            3600,
        );

        assert_eq!(claims.exp, claims.iat + 3600);
        assert_eq!(claims.aud, "app");
        assert_eq!(claims.iss, "svc");
        assert_eq!(claims.jti.as_deref(), Some("42"));
        assert_eq!(claims.sub.as_deref(), Some("session"));
        assert!(!claims.is_expired(0));
    }

    #[test]
    fn test_claims_expiry_leeway() {
        let mut claims = Claims::new(
            "1".to_string(),
            "p".to_string(),
            "app".to_string(),
            "svc".to_string(),
            0,
        );

        // exp == now is still acceptable
        assert!(!claims.is_expired(EXPIRY_LEEWAY_SECONDS));

        // within leeway
        claims.exp = Utc::now().timestamp() - EXPIRY_LEEWAY_SECONDS;
        assert!(!claims.is_expired(EXPIRY_LEEWAY_SECONDS));

        // beyond leeway
        claims.exp = Utc::now().timestamp() - EXPIRY_LEEWAY_SECONDS - 2;
        assert!(claims.is_expired(EXPIRY_LEEWAY_SECONDS));
    }

    #[test]
    fn test_claims_deserialize_missing_optional_fields() {
        let claims: Claims = serde_json::from_str(r#"{"exp": 1700000000}"#).unwrap();

        assert_eq!(claims.aud, "");
        assert_eq!(claims.iss, "");
        assert_eq!(claims.iat, 0);
        assert!(claims.jti.is_none());
        assert!(claims.sub.is_none());
    }

    #[test]
    fn test_claims_serialization_round_trip() {
        let claims = Claims::new(
            "3Kb".to_string(),
            "session-payload".to_string(),
            "app".to_string(),
            "svc".to_string(),
            60,
        );

        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, back);
    }
}
