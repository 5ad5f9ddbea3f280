//! Black-box generate/parse scenarios, placed the way
//! `toka-auth/tests/jwt_validation.rs` places its integration tests.

use indexmap::IndexMap;
use tales_jwt::base64url;
use tales_jwt::prelude::*;

fn manager() -> TokenManager {
    TokenManager::new(ClaimRegistry::new())
}

#[test]
fn s1_sign_and_verify_hs256() {
    let manager = manager();
    let secret = b"secret".repeat(8); // pad to the 32-byte HS256 minimum
    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string("joe"));
    claims.insert("admin".to_string(), ClaimValue::Bool(true));

    let config = GenerationConfig::with_algorithm(SigningAlgorithm::Hs256);
    let token = manager.generate(None, &claims, Some(&secret), Some(&config)).unwrap();
    assert!(token.verified());

    let parsed = manager.parse(token.serialized(), Some(&secret)).unwrap();
    assert!(parsed.verified());
    assert_eq!(parsed.claim("sub"), Some(&ClaimValue::string("joe")));
    assert_eq!(parsed.claim("admin"), Some(&ClaimValue::Bool(true)));
}

#[test]
fn s3_uri_rule_on_iss() {
    let manager = manager();
    let secret = b"01234567890123456789012345678901";

    let mut bad = IndexMap::new();
    bad.insert("iss".to_string(), ClaimValue::string("foo:bar"));
    let err = manager.generate(None, &bad, Some(secret), None).unwrap_err();
    assert!(matches!(err, Error::Claim(tales_claims::Error::InvalidClaimValue { .. })));

    let mut good = IndexMap::new();
    good.insert("iss".to_string(), ClaimValue::string("https://example.com"));
    assert!(manager.generate(None, &good, Some(secret), None).is_ok());

    let mut app_claim = IndexMap::new();
    app_claim.insert("nickname".to_string(), ClaimValue::string("a:b"));
    let err = manager.generate(None, &app_claim, Some(secret), None).unwrap_err();
    assert!(matches!(err, Error::Claim(tales_claims::Error::InvalidClaimValue { .. })));
}

#[test]
fn s4_aud_polymorphism_round_trips_through_a_token() {
    let manager = manager();
    let secret = b"01234567890123456789012345678901";

    let mut claims = IndexMap::new();
    claims.insert("aud".to_string(), ClaimValue::string("a"));
    let config = GenerationConfig::with_algorithm(SigningAlgorithm::Hs256);
    let token = manager.generate(None, &claims, Some(secret), Some(&config)).unwrap();

    let parsed = manager.parse(token.serialized(), Some(secret)).unwrap();
    assert_eq!(parsed.claim("aud"), Some(&ClaimValue::string_array(["a"])));
}

#[test]
fn s6_malformed_inputs() {
    let manager = manager();

    let err = manager.parse("abc.def", None).unwrap_err();
    assert!(matches!(err, Error::MalformedToken(_)));

    let err = manager.parse("abc.def.ghi.jkl", None).unwrap_err();
    assert!(matches!(err, Error::MalformedToken(_)));

    let header = base64url::encode(br#"{"alg":"RS256"}"#);
    let claims = base64url::encode(br#"{}"#);
    let err = manager.parse(&format!("{header}.{claims}.sig"), None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedAlgorithm(id) if id == "RS256"));
}

#[test]
fn tampered_claims_segment_is_unverified_not_an_error() {
    let manager = manager();
    let secret = b"01234567890123456789012345678901";
    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string("joe"));
    let config = GenerationConfig::with_algorithm(SigningAlgorithm::Hs256);
    let token = manager.generate(None, &claims, Some(secret), Some(&config)).unwrap();

    let mut segments: Vec<&str> = token.serialized().split('.').collect();
    let mut tampered_claims_bytes = base64url::decode(segments[1]).unwrap();
    tampered_claims_bytes[0] ^= 0xFF;
    let tampered_claims_seg = base64url::encode(&tampered_claims_bytes);
    segments[1] = &tampered_claims_seg;
    let tampered = segments.join(".");

    let parsed = manager.parse(&tampered, Some(secret)).unwrap();
    assert!(!parsed.verified());
}

#[test]
fn algorithm_substitution_to_none_is_unverified() {
    let manager = manager();
    let secret = b"01234567890123456789012345678901";
    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string("joe"));
    let config = GenerationConfig::with_algorithm(SigningAlgorithm::Hs256);
    let token = manager.generate(None, &claims, Some(secret), Some(&config)).unwrap();

    let segments: Vec<&str> = token.serialized().split('.').collect();
    let forged_header = base64url::encode(br#"{"alg":"none"}"#);
    let forged = format!("{forged_header}.{}.", segments[1]);

    let parsed = manager.parse(&forged, Some(secret)).unwrap();
    assert!(!parsed.verified());
}

#[test]
fn unsigned_tokens_have_no_padding_and_empty_signature_segment() {
    let manager = manager();
    let claims = IndexMap::new();
    let config = GenerationConfig::with_algorithm(SigningAlgorithm::None);
    let token = manager.generate(None, &claims, None, Some(&config)).unwrap();

    assert!(token.serialized().ends_with('.'));
    assert!(!token.serialized().contains('='));

    let parsed = manager.parse(token.serialized(), None).unwrap();
    assert!(parsed.verified());
}

#[test]
fn determinism_with_a_fixed_clock() {
    let manager = manager();
    let secret = b"01234567890123456789012345678901";
    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string("joe"));
    let config = GenerationConfig {
        include_issued_time: true,
        ..GenerationConfig::with_algorithm(SigningAlgorithm::Hs256)
    };

    let first = manager.generate_at(None, &claims, Some(secret), Some(&config), 1_000_000).unwrap();
    let second = manager.generate_at(None, &claims, Some(secret), Some(&config), 1_000_000).unwrap();
    assert_eq!(first.serialized(), second.serialized());
}
