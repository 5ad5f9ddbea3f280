//! The claim translation registry.
//!
//! Grounded on `toka-capability-core`'s crate-local `Error`/`Result`
//! convention plus `mikkyang-rust-jwt::claims::ClaimsV2`'s mix of typed
//! registered claims and an untyped bag for everything else — here
//! generalized from "one untyped bag" to "one codec per claim name, with a
//! primitive fallback for anything unregistered".

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::value::ClaimValue;

/// Bidirectional translation between [`ClaimValue`] and its JSON wire
/// element for one claim name.
///
/// Implementations are free to accept more than one JSON shape on
/// `decode` (see [`AudCodec`], which accepts either a bare string or an
/// array) as long as `encode` is consistent and always produces the
/// canonical shape.
pub trait ClaimCodec: Send + Sync {
    /// Render a claim value to the JSON element written to the wire.
    fn encode(&self, value: &ClaimValue) -> Result<Json>;

    /// Parse a JSON element back into a claim value.
    fn decode(&self, json: &Json) -> Result<ClaimValue>;
}

/// Per-claim-name codec registry.
///
/// Registration happens once, during setup — a fresh `ClaimRegistry`
/// pre-registers the `aud` codec, the owner registers any
/// application-specific codecs, and the resulting
/// registry is handed to `tales_jwt::TokenManager` and shared read-only
/// across threads from then on.
pub struct ClaimRegistry {
    codecs: HashMap<String, Arc<dyn ClaimCodec>>,
}

impl ClaimRegistry {
    /// A registry with only the built-in `aud` codec registered.
    pub fn new() -> Self {
        let mut registry = ClaimRegistry { codecs: HashMap::new() };
        registry
            .codecs
            .insert("aud".to_string(), Arc::new(AudCodec) as Arc<dyn ClaimCodec>);
        registry
    }

    /// Register a codec for `claim_name`. Fails if one is already
    /// registered, including the built-in `aud` codec.
    pub fn register(&mut self, claim_name: impl Into<String>, codec: impl ClaimCodec + 'static) -> Result<()> {
        let claim_name = claim_name.into();
        if self.codecs.contains_key(&claim_name) {
            return Err(Error::DuplicateRegistration(claim_name));
        }
        self.codecs.insert(claim_name, Arc::new(codec));
        Ok(())
    }

    /// Look up the codec registered for `claim_name`, if any.
    pub fn codec_for(&self, claim_name: &str) -> Option<&Arc<dyn ClaimCodec>> {
        self.codecs.get(claim_name)
    }

    /// Encode `value` for `claim_name`, using the registered codec if one
    /// exists, otherwise the primitive fallback: strings, numbers, booleans
    /// pass through; anything else is `UnsupportedClaimValueError`.
    pub fn encode(&self, claim_name: &str, value: &ClaimValue) -> Result<Json> {
        if let Some(codec) = self.codec_for(claim_name) {
            return codec.encode(value);
        }
        match value {
            ClaimValue::String(_) | ClaimValue::Number(_) | ClaimValue::Bool(_) => {
                Json::try_from(value).map_err(|_| Error::UnsupportedClaimValue(claim_name.to_string()))
            }
            _ => Err(Error::UnsupportedClaimValue(claim_name.to_string())),
        }
    }

    /// Decode the JSON element for `claim_name`, using the registered codec
    /// if one exists, otherwise the primitive fallback.
    pub fn decode(&self, claim_name: &str, json: &Json) -> Result<ClaimValue> {
        if let Some(codec) = self.codec_for(claim_name) {
            return codec.decode(json);
        }
        match json {
            Json::String(_) | Json::Number(_) | Json::Bool(_) => Ok(ClaimValue::from(json.clone())),
            _ => Err(Error::UnsupportedClaimValue(claim_name.to_string())),
        }
    }
}

impl Default for ClaimRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in `aud` codec: array of strings on the wire, but accepts a
/// bare string on read and always normalizes to the array form on write.
struct AudCodec;

impl ClaimCodec for AudCodec {
    fn encode(&self, value: &ClaimValue) -> Result<Json> {
        let members: Vec<String> = match value {
            ClaimValue::String(s) => vec![s.clone()],
            ClaimValue::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| Error::ClaimEncoding {
                        claim: "aud".to_string(),
                        reason: "array members must be strings".to_string(),
                    })
                })
                .collect::<Result<_>>()?,
            other => {
                return Err(Error::ClaimEncoding {
                    claim: "aud".to_string(),
                    reason: format!("expected string or array of strings, got {}", other.kind_name()),
                })
            }
        };
        Ok(Json::Array(members.into_iter().map(Json::String).collect()))
    }

    fn decode(&self, json: &Json) -> Result<ClaimValue> {
        match json {
            Json::String(s) => Ok(ClaimValue::string_array([s.clone()])),
            Json::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Json::String(s) => out.push(s.clone()),
                        other => {
                            return Err(Error::ClaimDecoding {
                                claim: "aud".to_string(),
                                reason: format!("array members must be strings, got {other}"),
                            })
                        }
                    }
                }
                Ok(ClaimValue::string_array(out))
            }
            other => Err(Error::ClaimDecoding {
                claim: "aud".to_string(),
                reason: format!("expected string or array of strings, got {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aud_write_string_normalizes_to_array() {
        let registry = ClaimRegistry::new();
        let encoded = registry.encode("aud", &ClaimValue::string("a")).unwrap();
        assert_eq!(encoded, Json::Array(vec![Json::String("a".to_string())]));
    }

    #[test]
    fn aud_read_string_becomes_one_element_array() {
        let registry = ClaimRegistry::new();
        let decoded = registry.decode("aud", &Json::String("a".to_string())).unwrap();
        assert_eq!(decoded, ClaimValue::string_array(["a"]));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = ClaimRegistry::new();
        let err = registry.register("aud", AudCodec).unwrap_err();
        assert!(matches!(err, Error::DuplicateRegistration(name) if name == "aud"));
    }

    #[test]
    fn primitive_fallback_rejects_array() {
        let registry = ClaimRegistry::new();
        let err = registry
            .encode("scopes", &ClaimValue::Array(vec![ClaimValue::string("a")]))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedClaimValue(name) if name == "scopes"));
    }

    #[test]
    fn primitive_fallback_accepts_string_number_bool() {
        let registry = ClaimRegistry::new();
        assert!(registry.encode("sub", &ClaimValue::string("joe")).is_ok());
        assert!(registry
            .encode("count", &ClaimValue::Number(serde_json::Number::from(3)))
            .is_ok());
        assert!(registry.encode("admin", &ClaimValue::Bool(true)).is_ok());
    }
}
