//! The claim-name → capability-family registration table (registration
//! half).
//!
//! Grounded on `toka-kernel::registry`'s global lookup-table pattern,
//! narrowed here to an instance the application builds once at startup
//! rather than a process-wide `Lazy<RwLock<...>>` — the original kernel
//! needs the global form because opcode handlers are registered from
//! independently compiled plugin crates; Tales' families are all known at
//! the call site that builds the `AuthorizationRegistry`.

use std::collections::HashMap;
use std::sync::Arc;

use tales_claims::ClaimRegistry;

use crate::bitset::CapabilitySet;
use crate::codec::BitsetCodec;
use crate::declaration::AccessControlDeclaration;
use crate::error::{Error, Result};
use crate::family::CapabilityFamily;

/// Maps claim names to the capability family their value is drawn from,
/// and builds [`AccessControlDeclaration`]s against that mapping.
pub struct AuthorizationRegistry {
    families: HashMap<String, Arc<CapabilityFamily>>,
}

impl AuthorizationRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        AuthorizationRegistry { families: HashMap::new() }
    }

    /// Associate `claim_name` with `family`, and register the matching
    /// bitset codec into `claim_registry` so a `tales_jwt::TokenManager`
    /// sharing that registry encodes/decodes the claim as a capability set.
    ///
    /// Fails if `claim_name` is already associated with a family, or if the
    /// claim registry already has a codec registered for that name.
    pub fn register_claim_family(
        &mut self,
        claim_registry: &mut ClaimRegistry,
        claim_name: impl Into<String>,
        family: Arc<CapabilityFamily>,
    ) -> Result<()> {
        let claim_name = claim_name.into();
        if self.families.contains_key(&claim_name) {
            return Err(Error::Configuration(format!("claim `{claim_name}` is already bound to a capability family")));
        }
        claim_registry
            .register(claim_name.clone(), BitsetCodec::new(family.clone()))
            .map_err(Error::Claim)?;
        self.families.insert(claim_name, family);
        Ok(())
    }

    /// Build an [`AccessControlDeclaration`] requiring `capability_names`
    /// on `claim_name`. Unknown capability names are rejected here, at
    /// registration time — never deferred to [`crate::evaluator::authorize`].
    pub fn declare<I, S>(&self, claim_name: impl Into<String>, capability_names: I) -> Result<AccessControlDeclaration>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let claim_name = claim_name.into();
        let family = self
            .families
            .get(&claim_name)
            .ok_or_else(|| Error::Configuration(format!("no capability family registered for claim `{claim_name}`")))?;
        let required = CapabilitySet::from_names(family.clone(), capability_names)
            .map_err(|err| match err {
                Error::UnknownCapability(name) => Error::Configuration(format!(
                    "capability `{name}` is not a member of the family registered for claim `{claim_name}`"
                )),
                other => other,
            })?;
        Ok(AccessControlDeclaration { claim_name, required })
    }

    /// The family registered for `claim_name`, if any.
    pub fn family_for(&self, claim_name: &str) -> Option<&Arc<CapabilityFamily>> {
        self.families.get(claim_name)
    }
}

impl Default for AuthorizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops_family() -> Arc<CapabilityFamily> {
        Arc::new(
            CapabilityFamily::builder("ops")
                .capability("read")
                .unwrap()
                .capability("write")
                .unwrap()
                .capability("admin")
                .unwrap()
                .build(),
        )
    }

    #[test]
    fn unknown_capability_at_declaration_time_is_a_configuration_error() {
        let mut claim_registry = ClaimRegistry::new();
        let mut registry = AuthorizationRegistry::new();
        registry.register_claim_family(&mut claim_registry, "ops_caps", ops_family()).unwrap();

        let err = registry.declare("ops_caps", ["fly"]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rebinding_a_claim_name_is_rejected() {
        let mut claim_registry = ClaimRegistry::new();
        let mut registry = AuthorizationRegistry::new();
        registry.register_claim_family(&mut claim_registry, "ops_caps", ops_family()).unwrap();
        let err = registry.register_claim_family(&mut claim_registry, "ops_caps", ops_family()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
