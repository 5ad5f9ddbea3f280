//! Capability bitsets (compact-set half).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tales_claims::CustomClaim;

use crate::error::{Error, Result};
use crate::family::CapabilityFamily;

const WORD_BITS: usize = u64::BITS as usize;

/// A compact subset of a [`CapabilityFamily`], stored as fixed-width words.
///
/// Two bitsets only compare equal, and `contains_all` only succeeds,
/// against bitsets over the *same* family (compared by `Arc` identity —
/// two families with identical capability names built separately are
/// still distinct universes).
#[derive(Clone)]
pub struct CapabilitySet {
    family: Arc<CapabilityFamily>,
    words: Vec<u64>,
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("family", &self.family.name())
            .field("capabilities", &self.names())
            .finish()
    }
}

impl CapabilitySet {
    /// An empty set over `family`.
    pub fn empty(family: Arc<CapabilityFamily>) -> Self {
        let word_count = family.len().div_ceil(WORD_BITS).max(1);
        CapabilitySet { family, words: vec![0u64; word_count] }
    }

    /// Build a set containing exactly `names`, in any order. Fails with
    /// [`Error::UnknownCapability`] if any name is absent from the family.
    pub fn from_names<I, S>(family: Arc<CapabilityFamily>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CapabilitySet::empty(family);
        for name in names {
            set.insert_name(name.as_ref())?;
        }
        Ok(set)
    }

    /// The family this set is defined over.
    pub fn family(&self) -> &Arc<CapabilityFamily> {
        &self.family
    }

    /// Insert a capability by ordinal. Out-of-range ordinals are ignored —
    /// callers only ever obtain ordinals via [`CapabilityFamily::ordinal_of`],
    /// which cannot produce one past the family's length.
    pub fn insert_ordinal(&mut self, ordinal: usize) {
        if ordinal >= self.family.len() {
            return;
        }
        self.words[ordinal / WORD_BITS] |= 1u64 << (ordinal % WORD_BITS);
    }

    /// Insert a capability by name, resolving it against this set's family.
    pub fn insert_name(&mut self, name: &str) -> Result<()> {
        let ordinal = self.family.ordinal_of(name).ok_or_else(|| Error::UnknownCapability(name.to_string()))?;
        self.insert_ordinal(ordinal);
        Ok(())
    }

    /// Whether the ordinal's bit is set.
    pub fn contains_ordinal(&self, ordinal: usize) -> bool {
        ordinal < self.family.len() && (self.words[ordinal / WORD_BITS] >> (ordinal % WORD_BITS)) & 1 == 1
    }

    /// `true` iff every bit set in `required` is also set in `self`
    /// (`(this AND required) == required`). Bitsets over different
    /// families never satisfy this.
    pub fn contains_all(&self, required: &CapabilitySet) -> bool {
        if !Arc::ptr_eq(&self.family, &required.family) {
            return false;
        }
        self.words
            .iter()
            .zip(&required.words)
            .all(|(mine, theirs)| (mine & theirs) == *theirs)
    }

    /// Capability names required by `required` but absent from `self`, in
    /// family order. Used to build the `insufficient_capabilities` deny
    /// reason.
    pub fn names_missing_for(&self, required: &CapabilitySet) -> Vec<String> {
        (0..self.family.len())
            .filter(|&ordinal| required.contains_ordinal(ordinal) && !self.contains_ordinal(ordinal))
            .filter_map(|ordinal| self.family.capability_name(ordinal).map(str::to_string))
            .collect()
    }

    /// This set's members, in family order.
    pub fn names(&self) -> Vec<String> {
        (0..self.family.len())
            .filter(|&ordinal| self.contains_ordinal(ordinal))
            .filter_map(|ordinal| self.family.capability_name(ordinal).map(str::to_string))
            .collect()
    }
}

impl PartialEq for CapabilitySet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.family, &other.family) && self.words == other.words
    }
}

impl CustomClaim for CapabilitySet {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.names().into_iter().map(serde_json::Value::String).collect())
    }

    fn eq_dyn(&self, other: &dyn CustomClaim) -> bool {
        other.as_any().downcast_ref::<CapabilitySet>().is_some_and(|other| self == other)
    }

    fn clone_dyn(&self) -> Box<dyn CustomClaim> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
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
    fn contains_all_of_empty_is_always_true() {
        let family = ops_family();
        let set = CapabilitySet::from_names(family.clone(), ["read"]).unwrap();
        let empty = CapabilitySet::empty(family);
        assert!(set.contains_all(&empty));
    }

    #[test]
    fn contains_all_distributes_over_union() {
        let family = ops_family();
        let a = CapabilitySet::from_names(family.clone(), ["read"]).unwrap();
        let b = CapabilitySet::from_names(family.clone(), ["write"]).unwrap();
        let both = CapabilitySet::from_names(family.clone(), ["read", "write"]).unwrap();
        let superset = CapabilitySet::from_names(family, ["read", "write", "admin"]).unwrap();

        assert_eq!(superset.contains_all(&both), superset.contains_all(&a) && superset.contains_all(&b));
    }

    #[test]
    fn unknown_capability_name_is_rejected() {
        let family = ops_family();
        let err = CapabilitySet::from_names(family, ["fly"]).unwrap_err();
        assert!(matches!(err, Error::UnknownCapability(name) if name == "fly"));
    }

    #[test]
    fn different_family_instances_never_match() {
        let family_a = ops_family();
        let family_b = ops_family();
        let a = CapabilitySet::from_names(family_a, ["read"]).unwrap();
        let b = CapabilitySet::from_names(family_b, ["read"]).unwrap();
        assert!(!a.contains_all(&b));
        assert_ne!(a, b);
    }
}
