//! The token manager: generation and parsing.
//!
//! Grounded on `toka-capability-jwt-hs256`'s `JwtHs256Token`/
//! `JwtHs256Validator` pair for the overall generate/parse split, but the
//! body is hand-rolled against the wire primitives in this crate instead of
//! delegating to the `jsonwebtoken` crate, which can't express bit-exact
//! segment control, a pluggable "none" algorithm, or insertion-order-
//! preserving claim maps.

use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use serde_json::Map as JsonMap;
use serde_json::Value as Json;
use tales_claims::{ClaimRegistry, ClaimValue, GenerationConfig, SigningAlgorithm, Token};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::base64url;
use crate::error::{Error, Result};
use crate::registry::resolve_algorithm;
use crate::signing;

/// Generates and parses compact JWS tokens against one claim registry.
///
/// A single instance is meant to be constructed once (typically alongside
/// application startup, the same way `toka-runtime::Runtime` is built once)
/// and shared read-only by every request handler afterward.
pub struct TokenManager {
    registry: ClaimRegistry,
}

impl TokenManager {
    /// Build a manager around an already-populated claim registry.
    pub fn new(registry: ClaimRegistry) -> Self {
        TokenManager { registry }
    }

    /// The registry this manager encodes and decodes claims with.
    pub fn registry(&self) -> &ClaimRegistry {
        &self.registry
    }

    /// Generate a token from `claims` (and, optionally, extra `headers`),
    /// signing it with `secret` under `config` (or the default config).
    ///
    /// This is a thin wrapper around [`Self::generate_at`] using the
    /// current wall-clock time.
    pub fn generate(
        &self,
        headers: Option<&IndexMap<String, ClaimValue>>,
        claims: &IndexMap<String, ClaimValue>,
        secret: Option<&[u8]>,
        config: Option<&GenerationConfig>,
    ) -> Result<Token> {
        self.generate_at(headers, claims, secret, config, current_unix_time())
    }

    /// Same as [`Self::generate`] but with an explicit "now", so that
    /// claim-timestamp determinism is directly testable without racing the
    /// wall clock.
    pub fn generate_at(
        &self,
        headers: Option<&IndexMap<String, ClaimValue>>,
        claims: &IndexMap<String, ClaimValue>,
        secret: Option<&[u8]>,
        config: Option<&GenerationConfig>,
        now: u64,
    ) -> Result<Token> {
        let owned_default_config;
        let config = match config {
            Some(c) => c,
            None => {
                owned_default_config = GenerationConfig::default();
                &owned_default_config
            }
        };

        let mut out_headers = headers.cloned().unwrap_or_default();
        out_headers.insert("alg".to_string(), ClaimValue::string(config.signing_algorithm.wire_identifier()));

        let mut out_claims = claims.clone();
        if let Some(issuer) = &config.issuer {
            out_claims.insert("iss".to_string(), ClaimValue::string(issuer.clone()));
        }
        if config.generate_id {
            out_claims.insert("jti".to_string(), ClaimValue::string(Uuid::new_v4().to_string()));
        }
        if config.include_issued_time {
            out_claims.insert("iat".to_string(), ClaimValue::Number(now.into()));
        }
        if let Some(delay) = config.valid_delay_seconds {
            out_claims.insert("nbf".to_string(), ClaimValue::Number((now + delay).into()));
        }
        if let Some(duration) = config.valid_duration_seconds {
            let delay = config.valid_delay_seconds.unwrap_or(0);
            out_claims.insert("exp".to_string(), ClaimValue::Number((now + delay + duration).into()));
        }

        let claims_json = self.encode_claims(&out_claims)?;
        let headers_json = encode_headers(&out_headers)?;

        let header_seg = base64url::encode(&serialize_compact(&headers_json)?);
        let claims_seg = base64url::encode(&serialize_compact(&claims_json)?);
        let signing_input = format!("{header_seg}.{claims_seg}");

        let serialized = if config.signing_algorithm.is_signed() {
            let secret = secret
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Configuration("signing was requested but no secret was provided".to_string()))?;
            let mac = signing::compute_mac(config.signing_algorithm, secret, signing_input.as_bytes(), true)?;
            format!("{signing_input}.{}", base64url::encode(&mac))
        } else {
            format!("{signing_input}.")
        };

        debug!(
            algorithm = config.signing_algorithm.wire_identifier(),
            claim_count = out_claims.len(),
            "generated token"
        );

        Ok(Token::new(out_headers, out_claims, serialized, true))
    }

    /// Parse a compact JWS string, recomputing its signature against
    /// `secret` if the declared algorithm signs.
    ///
    /// Structural defects raise; signature mismatch and expiry are never
    /// errors here — only the returned token's `verified()` flag reflects
    /// them.
    pub fn parse(&self, serialized: &str, secret: Option<&[u8]>) -> Result<Token> {
        let segments: Vec<&str> = serialized.split('.').collect();
        if segments.len() < 2 {
            return Err(Error::MalformedToken(format!("expected at least 2 segments, got {}", segments.len())));
        }

        let header_seg = segments[0];
        let claims_seg = segments[1];

        let header_obj = decode_json_object(header_seg, "header")?;
        let alg_str = header_obj
            .get("alg")
            .and_then(Json::as_str)
            .ok_or_else(|| Error::MalformedToken("header is missing `alg`".to_string()))?;
        let algorithm = resolve_algorithm(alg_str)?;

        if algorithm.is_signed() {
            if segments.len() != 3 {
                return Err(Error::MalformedToken(format!(
                    "expected 3 segments for a signed token (alg={alg_str}), got {}",
                    segments.len()
                )));
            }
        } else if segments.len() != 2 && !(segments.len() == 3 && segments[2].is_empty()) {
            return Err(Error::MalformedToken(format!(
                "expected 2 segments (optionally a trailing empty one) for alg=none, got {}",
                segments.len()
            )));
        }

        let claims_obj = decode_json_object(claims_seg, "claims")?;

        let mut out_headers = IndexMap::with_capacity(header_obj.len());
        for (name, json) in &header_obj {
            out_headers.insert(name.clone(), self.decode_member(name, json)?);
        }

        let mut out_claims = IndexMap::with_capacity(claims_obj.len());
        for (name, json) in &claims_obj {
            out_claims.insert(name.clone(), self.decode_member(name, json)?);
        }

        let verified = if algorithm.is_signed() {
            self.verify_signature(algorithm, header_seg, claims_seg, segments[2], secret, alg_str)?
        } else {
            match secret {
                Some(s) if !s.is_empty() => {
                    warn!("alg=none token parsed with a non-empty secret present; treating as unverified");
                    false
                }
                _ => true,
            }
        };

        debug!(algorithm = alg_str, verified, "parsed token");

        Ok(Token::new(out_headers, out_claims, serialized.to_string(), verified))
    }

    fn verify_signature(
        &self,
        algorithm: SigningAlgorithm,
        header_seg: &str,
        claims_seg: &str,
        signature_seg: &str,
        secret: Option<&[u8]>,
        alg_str: &str,
    ) -> Result<bool> {
        let signature_bytes = base64url::decode(signature_seg)?;
        let secret = match secret {
            Some(s) if !s.is_empty() => s,
            _ => {
                warn!(algorithm = alg_str, "signed token parsed without a secret; treating as unverified");
                return Ok(false);
            }
        };
        let signing_input = format!("{header_seg}.{claims_seg}");
        let expected = match signing::compute_mac(algorithm, secret, signing_input.as_bytes(), false) {
            Ok(mac) => mac,
            Err(_) => return Ok(false),
        };
        let matched = signing::signatures_match(&expected, &signature_bytes);
        if !matched {
            warn!(algorithm = alg_str, "signature mismatch while parsing token");
        }
        Ok(matched)
    }

    fn decode_member(&self, name: &str, json: &Json) -> Result<ClaimValue> {
        self.registry.decode(name, json).map_err(|err| match err {
            tales_claims::Error::UnsupportedClaimValue(name) => Error::MalformedToken(format!(
                "claim `{name}` has an unsupported JSON shape and no registered codec"
            )),
            other => Error::Claim(other),
        })
    }

    fn encode_claims(&self, claims: &IndexMap<String, ClaimValue>) -> Result<JsonMap<String, Json>> {
        let mut out = JsonMap::with_capacity(claims.len());
        for (name, value) in claims {
            if self.registry.codec_for(name).is_none() {
                validate_primitive_claim(name, value)?;
            }
            let json = self.registry.encode(name, value).map_err(Error::Claim)?;
            out.insert(name.clone(), json);
        }
        Ok(out)
    }
}

fn validate_primitive_claim(name: &str, value: &ClaimValue) -> Result<()> {
    match value {
        ClaimValue::Null => Err(Error::Claim(tales_claims::Error::InvalidClaimValue {
            claim: name.to_string(),
            reason: "null claim values are rejected; omit the claim instead".to_string(),
        })),
        ClaimValue::String(s) if s.contains(':') && !tales_claims::uri::is_valid_string_or_uri(s) => {
            Err(Error::Claim(tales_claims::Error::InvalidClaimValue {
                claim: name.to_string(),
                reason: format!("`{s}` contains `:` but is not a valid StringOrURI value"),
            }))
        }
        _ => Ok(()),
    }
}

fn encode_headers(headers: &IndexMap<String, ClaimValue>) -> Result<JsonMap<String, Json>> {
    let mut out = JsonMap::with_capacity(headers.len());
    for (name, value) in headers {
        let json = Json::try_from(value).map_err(Error::Claim)?;
        out.insert(name.clone(), json);
    }
    Ok(out)
}

fn serialize_compact(map: &JsonMap<String, Json>) -> Result<Vec<u8>> {
    serde_json::to_vec(&Json::Object(map.clone()))
        .map_err(|err| Error::MalformedToken(format!("failed to serialize JSON: {err}")))
}

fn decode_json_object(segment: &str, label: &str) -> Result<JsonMap<String, Json>> {
    let bytes = base64url::decode(segment)?;
    let value: Json =
        serde_json::from_slice(&bytes).map_err(|err| Error::MalformedToken(format!("invalid {label} JSON: {err}")))?;
    match value {
        Json::Object(map) => Ok(map),
        other => Err(Error::MalformedToken(format!("{label} must be a JSON object, got {}", kind_of(&other)))),
    }
}

fn kind_of(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn current_unix_time() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
