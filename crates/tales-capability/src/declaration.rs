//! Access-control declarations.

use crate::bitset::CapabilitySet;

/// One `{claim_name, required_capabilities}` pair attached to a protected
/// operation.
///
/// Built by [`crate::registry::AuthorizationRegistry::declare`], which
/// resolves capability names against the claim's registered family and
/// rejects unknown names at registration time rather than letting them
/// reach [`crate::evaluator::authorize`].
#[derive(Debug, Clone)]
pub struct AccessControlDeclaration {
    pub(crate) claim_name: String,
    pub(crate) required: CapabilitySet,
}

impl AccessControlDeclaration {
    /// The claim this declaration checks.
    pub fn claim_name(&self) -> &str {
        &self.claim_name
    }

    /// The capabilities a token's claim must contain for this declaration
    /// to be satisfied.
    pub fn required(&self) -> &CapabilitySet {
        &self.required
    }
}
