//! Tests for token issuing, parsing and claim validation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use signet_shared::TokenConfig;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;
use crate::services::token::{TokenKeys, TokenService};

use super::{OTHER_PRIVATE_KEY, TEST_PRIVATE_KEY, TEST_PUBLIC_KEY};

fn config() -> TokenConfig {
    TokenConfig::new("app", "svc").with_lifetime_seconds(3600)
}

/// Service holding both test keys, able to issue and verify
fn service_with(config: TokenConfig) -> TokenService {
    let keys = TokenKeys::from_pem(Some(TEST_PRIVATE_KEY), Some(TEST_PUBLIC_KEY))
        .expect("failed to load test keys");
    TokenService::with_keys(config, keys)
}

/// Signs arbitrary claims with the test private key, bypassing the
/// service, for crafting edge-case tokens
fn sign_claims(claims: &Claims) -> String {
    let key = EncodingKey::from_rsa_pem(TEST_PRIVATE_KEY.as_bytes()).unwrap();
    encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

fn claims_for(subject: Option<&str>, payload: Option<&str>, exp_offset: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        aud: "app".to_string(),
        exp: now + exp_offset,
        iat: now,
        iss: "svc".to_string(),
        jti: subject.map(String::from),
        sub: payload.map(String::from),
    }
}

#[test]
fn test_round_trip() {
    let service = service_with(config());

    let token = service.create_token(42, "session-payload").unwrap();
    let identity = service.parse_token(&token).unwrap();

    assert_eq!(identity.user_id, 42);
    assert_eq!(identity.payload, "session-payload");
}

#[test]
fn test_round_trip_with_obfuscation() {
    let service = service_with(config().with_obfuscation_secret("hot-salt"));

    let token = service.create_token(42, "session-payload").unwrap();

    // The subject claim on the wire is the obfuscated form, not "42"
    let claims_segment = token.split('.').nth(1).unwrap();
    let claims: Claims =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(claims_segment).unwrap()).unwrap();
    assert_eq!(claims.jti.as_deref(), Some("Ulx"));
    assert_eq!(claims.sub.as_deref(), Some("session-payload"));
    assert_eq!(claims.exp, claims.iat + 3600);

    let identity = service.parse_token(&token).unwrap();
    assert_eq!(identity.user_id, 42);
    assert_eq!(identity.payload, "session-payload");
}

#[test]
fn test_signing_disabled_without_private_key() {
    let keys = TokenKeys::from_pem(None, Some(TEST_PUBLIC_KEY)).unwrap();
    let service = TokenService::with_keys(config(), keys);

    assert!(matches!(
        service.create_token(1, "p"),
        Err(TokenError::SigningDisabled)
    ));
}

#[test]
fn test_verification_disabled_without_public_key() {
    let keys = TokenKeys::from_pem(Some(TEST_PRIVATE_KEY), None).unwrap();
    let service = TokenService::with_keys(config(), keys);

    let token = service.create_token(1, "p").unwrap();
    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::VerificationDisabled)
    ));
}

#[test]
fn test_missing_key_paths_disable_both_roles() {
    let service = TokenService::new(config()).unwrap();

    assert!(matches!(
        service.create_token(1, "p"),
        Err(TokenError::SigningDisabled)
    ));
    assert!(matches!(
        service.parse_token("a.b.c"),
        Err(TokenError::VerificationDisabled)
    ));
}

#[test]
fn test_invalid_key_material_rejected() {
    assert!(matches!(
        TokenKeys::from_pem(Some("not a pem"), None),
        Err(TokenError::Configuration { .. })
    ));
    assert!(matches!(
        TokenKeys::from_pem(None, Some("not a pem")),
        Err(TokenError::Configuration { .. })
    ));
}

#[test]
fn test_unreadable_key_file_rejected_at_construction() {
    let result = TokenService::new(config().with_private_key_path("/nonexistent/key.pem"));

    assert!(matches!(result, Err(TokenError::Configuration { .. })));
}

#[test]
fn test_negative_user_id_rejected() {
    let service = service_with(config());

    assert!(matches!(
        service.create_token(-1, "p"),
        Err(TokenError::Encoding { .. })
    ));
}

#[test]
fn test_tampered_signature_rejected() {
    let service = service_with(config());
    let token = service.create_token(42, "p").unwrap();

    // Flip the first character of the signature segment; the segment
    // stays valid base64url, only the signature bytes change.
    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let replacement = if parts[2].as_bytes()[0] == b'A' { "B" } else { "A" };
    parts[2].replace_range(0..1, replacement);
    let tampered = parts.join(".");

    assert!(matches!(
        service.parse_token(&tampered),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_token_signed_by_other_key_rejected() {
    let issuer_keys = TokenKeys::from_pem(Some(OTHER_PRIVATE_KEY), None).unwrap();
    let issuer = TokenService::with_keys(config(), issuer_keys);
    let verifier = service_with(config());

    let token = issuer.create_token(42, "p").unwrap();

    assert!(matches!(
        verifier.parse_token(&token),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_structurally_invalid_tokens_rejected() {
    let service = service_with(config());

    for garbage in ["", "not-a-token", "a.b", "a.b.c.d", "!!.@@.##"] {
        assert!(
            matches!(service.parse_token(garbage), Err(TokenError::Malformed)),
            "{:?} was not reported as malformed",
            garbage
        );
    }
}

#[test]
fn test_unsigned_token_rejected() {
    let service = service_with(config());

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(br#"{"exp":9999999999}"#);
    let token = format!("{}.{}.", header, claims);

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_foreign_algorithm_rejected() {
    let service = service_with(config());

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(br#"{"exp":9999999999}"#);
    let signature = URL_SAFE_NO_PAD.encode(b"not-a-real-signature");
    let token = format!("{}.{}.{}", header, claims, signature);

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_expired_token_rejected() {
    let service = service_with(config());

    let token = sign_claims(&claims_for(Some("42"), Some("p"), -60));

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_expiring_now_is_accepted_within_leeway() {
    // Lifetime zero puts exp exactly at the issuing instant
    let service = service_with(config().with_lifetime_seconds(0));

    let token = service.create_token(7, "p").unwrap();
    let identity = service.parse_token(&token).unwrap();

    assert_eq!(identity.user_id, 7);
}

#[test]
fn test_expiry_checked_before_audience() {
    let service = service_with(config());

    let mut claims = claims_for(Some("42"), Some("p"), -60);
    claims.aud = "other-app".to_string();
    let token = sign_claims(&claims);

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::Expired)
    ));
}

#[test]
fn test_audience_mismatch_rejected() {
    let issuer = service_with(TokenConfig::new("app-a", "svc").with_lifetime_seconds(3600));
    let verifier = service_with(TokenConfig::new("app-b", "svc").with_lifetime_seconds(3600));

    let token = issuer.create_token(42, "p").unwrap();

    assert!(matches!(
        verifier.parse_token(&token),
        Err(TokenError::AudienceMismatch)
    ));
}

#[test]
fn test_issuer_mismatch_rejected() {
    let issuer = service_with(TokenConfig::new("app", "svc-a").with_lifetime_seconds(3600));
    let verifier = service_with(TokenConfig::new("app", "svc-b").with_lifetime_seconds(3600));

    let token = issuer.create_token(42, "p").unwrap();

    assert!(matches!(
        verifier.parse_token(&token),
        Err(TokenError::IssuerMismatch)
    ));
}

#[test]
fn test_missing_subject_rejected() {
    let service = service_with(config());

    let token = sign_claims(&claims_for(None, Some("p"), 3600));

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::Decoding { .. })
    ));
}

#[test]
fn test_non_numeric_subject_rejected_without_secret() {
    let service = service_with(config());

    let token = sign_claims(&claims_for(Some("not-a-number"), Some("p"), 3600));

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::Decoding { .. })
    ));
}

#[test]
fn test_subject_encoded_under_other_secret_rejected() {
    let issuer = service_with(config().with_obfuscation_secret("alpha"));
    let verifier = service_with(config().with_obfuscation_secret("beta"));

    let token = issuer.create_token(42, "p").unwrap();

    assert!(matches!(
        verifier.parse_token(&token),
        Err(TokenError::Decoding { .. })
    ));
}

#[test]
fn test_missing_payload_rejected() {
    let service = service_with(config());

    let token = sign_claims(&claims_for(Some("42"), None, 3600));

    assert!(matches!(
        service.parse_token(&token),
        Err(TokenError::MissingPayload)
    ));
}
