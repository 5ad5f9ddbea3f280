//! Black-box tests for the claim registry, mirroring the placement of
//! `toka-auth/tests/claims_validation.rs`.

use indexmap::IndexMap;
use tales_claims::prelude::*;

#[test]
fn aud_polymorphism_matches_scenario_s4() {
    let registry = ClaimRegistry::new();

    let array_form = registry
        .encode("aud", &ClaimValue::string_array(["a", "b"]))
        .expect("array form encodes");
    assert_eq!(array_form, serde_json::json!(["a", "b"]));

    let string_form = registry.encode("aud", &ClaimValue::string("a")).expect("string form coerces");
    assert_eq!(string_form, serde_json::json!(["a"]));

    let decoded = registry.decode("aud", &serde_json::json!("a")).expect("string decodes");
    assert_eq!(decoded, ClaimValue::string_array(["a"]));
}

#[test]
fn registering_a_codec_twice_fails() {
    struct Noop;
    impl ClaimCodec for Noop {
        fn encode(&self, value: &ClaimValue) -> tales_claims::Result<serde_json::Value> {
            serde_json::Value::try_from(value).map_err(Into::into)
        }
        fn decode(&self, json: &serde_json::Value) -> tales_claims::Result<ClaimValue> {
            Ok(ClaimValue::from(json.clone()))
        }
    }

    let mut registry = ClaimRegistry::new();
    registry.register("scope", Noop).expect("first registration succeeds");
    let err = registry.register("scope", Noop).unwrap_err();
    assert!(matches!(err, tales_claims::Error::DuplicateRegistration(name) if name == "scope"));
}

#[test]
fn string_or_uri_rule_matches_scenario_s3() {
    assert!(is_valid_string_or_uri("https://example.com"));
    assert!(!is_valid_string_or_uri("foo:bar"));
    assert!(!is_valid_string_or_uri("a:b"));
}

#[test]
fn token_exposes_defensive_copies() {
    let mut headers = IndexMap::new();
    headers.insert("alg".to_string(), ClaimValue::string("HS256"));
    let mut claims = IndexMap::new();
    claims.insert("sub".to_string(), ClaimValue::string("joe"));

    let token = Token::new(headers.clone(), claims.clone(), "abc.def.ghi".to_string(), true);

    assert_eq!(token.headers(), &headers);
    assert_eq!(token.claims(), &claims);
    assert_eq!(token.claim("sub"), Some(&ClaimValue::string("joe")));
    assert_eq!(token.algorithm_identifier(), Some("HS256"));
    assert!(token.verified());
}
