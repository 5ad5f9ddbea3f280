//! The capability-bitset claim codec.
//!
//! Registered into a `tales_claims::ClaimRegistry` by
//! [`crate::registry::AuthorizationRegistry::register_claim_family`] so that
//! `tales_jwt::TokenManager` encodes/decodes a bitset claim the same way it
//! does any other registered claim, without either crate knowing about the
//! other's internals beyond the shared `ClaimCodec` trait.

use std::sync::Arc;

use serde_json::Value as Json;
use tales_claims::{ClaimCodec, ClaimValue};

use crate::bitset::CapabilitySet;
use crate::family::CapabilityFamily;

/// Translates a [`CapabilitySet`] over one fixed family to and from a JSON
/// array of capability name strings.
pub struct BitsetCodec {
    family: Arc<CapabilityFamily>,
}

impl BitsetCodec {
    /// Build a codec bound to `family`.
    pub fn new(family: Arc<CapabilityFamily>) -> Self {
        BitsetCodec { family }
    }
}

impl ClaimCodec for BitsetCodec {
    fn encode(&self, value: &ClaimValue) -> tales_claims::Result<Json> {
        let set = value.downcast_custom::<CapabilitySet>().ok_or_else(|| tales_claims::Error::ClaimEncoding {
            claim: self.family.name().to_string(),
            reason: format!("expected a capability set over `{}`, got {}", self.family.name(), value.kind_name()),
        })?;
        Ok(Json::Array(set.names().into_iter().map(Json::String).collect()))
    }

    fn decode(&self, json: &Json) -> tales_claims::Result<ClaimValue> {
        let array = json.as_array().ok_or_else(|| tales_claims::Error::ClaimDecoding {
            claim: self.family.name().to_string(),
            reason: "expected a JSON array of capability names".to_string(),
        })?;

        let mut set = CapabilitySet::empty(self.family.clone());
        for item in array {
            let name = item.as_str().ok_or_else(|| tales_claims::Error::ClaimDecoding {
                claim: self.family.name().to_string(),
                reason: format!("capability array members must be strings, got {item}"),
            })?;
            set.insert_name(name).map_err(|_| tales_claims::Error::UnknownCapability(name.to_string()))?;
        }
        Ok(ClaimValue::Custom(Box::new(set)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::CapabilityFamily;

    fn ops_family() -> Arc<CapabilityFamily> {
        Arc::new(
            CapabilityFamily::builder("ops")
                .capability("read")
                .unwrap()
                .capability("write")
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn round_trips_through_json() {
        let family = ops_family();
        let codec = BitsetCodec::new(family.clone());
        let set = CapabilitySet::from_names(family, ["read"]).unwrap();
        let value = ClaimValue::Custom(Box::new(set));

        let json = codec.encode(&value).unwrap();
        assert_eq!(json, serde_json::json!(["read"]));

        let decoded = codec.decode(&json).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn unknown_capability_name_on_decode_is_rejected() {
        let family = ops_family();
        let codec = BitsetCodec::new(family);
        let err = codec.decode(&serde_json::json!(["fly"])).unwrap_err();
        assert!(matches!(err, tales_claims::Error::UnknownCapability(name) if name == "fly"));
    }
}
