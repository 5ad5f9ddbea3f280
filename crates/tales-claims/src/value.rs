//! The in-memory claim value model.
//!
//! The wire format only ever carries JSON, but the claim registry is a
//! *polymorphic* translation layer: a registered codec's logical type can be
//! richer than anything `serde_json::Value` expresses on its own (a
//! capability bitset, for instance — see `tales-capability`). `ClaimValue`
//! therefore keeps the JSON-shaped variants the primitive fallback needs
//! plus one type-erased escape hatch, `Custom`, that a codec-backed claim
//! can occupy.

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Number;

/// A value stored behind the `Custom` variant of [`ClaimValue`].
///
/// Implemented by richer domain types (e.g. a capability bitset) that want
/// to live inside a [`Token`](crate::token::Token)'s claim map without
/// `tales-claims` knowing their concrete type. `Token` never constructs one
/// of these directly; codecs registered via [`crate::codec::ClaimRegistry`]
/// do.
pub trait CustomClaim: Any + Send + Sync + fmt::Debug {
    /// Render this value as the JSON element a codec would emit for it.
    fn to_json(&self) -> serde_json::Value;

    /// Equality against another `Custom` claim, used by `ClaimValue`'s
    /// `PartialEq`. Implementations comparing against a different concrete
    /// type should return `false` rather than panicking.
    fn eq_dyn(&self, other: &dyn CustomClaim) -> bool;

    /// Produce an owned, boxed copy of this value, used by `ClaimValue`'s
    /// `Clone`.
    fn clone_dyn(&self) -> Box<dyn CustomClaim>;

    /// Narrow back to the concrete type a codec registered.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn CustomClaim> {
    fn clone(&self) -> Self {
        self.clone_dyn()
    }
}

/// The in-memory representation of a claim or header value.
///
/// `Null`/`Bool`/`Number`/`String`/`Array`/`Object` mirror JSON exactly, so
/// any value round-tripped through `serde_json` without a registered codec
/// lands here unchanged. `Custom` holds a codec-produced domain value that
/// does not have a natural JSON-primitive shape of its own.
#[derive(Debug)]
pub enum ClaimValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ClaimValue>),
    Object(IndexMap<String, ClaimValue>),
    Custom(Box<dyn CustomClaim>),
}

impl ClaimValue {
    /// Convenience constructor for a plain string claim.
    pub fn string(value: impl Into<String>) -> Self {
        ClaimValue::String(value.into())
    }

    /// Convenience constructor for an array of string claims, the common
    /// shape for things like `aud`.
    pub fn string_array<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ClaimValue::Array(values.into_iter().map(|s| ClaimValue::String(s.into())).collect())
    }

    /// This value's JSON shape as a string, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ClaimValue::Null => "null",
            ClaimValue::Bool(_) => "bool",
            ClaimValue::Number(_) => "number",
            ClaimValue::String(_) => "string",
            ClaimValue::Array(_) => "array",
            ClaimValue::Object(_) => "object",
            ClaimValue::Custom(_) => "custom",
        }
    }

    /// Borrow the string payload, if this is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the array payload, if this is an `Array` variant.
    pub fn as_array(&self) -> Option<&[ClaimValue]> {
        match self {
            ClaimValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Narrow a `Custom` claim back to a concrete type, returning `None` for
    /// any other variant or a type mismatch.
    pub fn downcast_custom<T: 'static>(&self) -> Option<&T> {
        match self {
            ClaimValue::Custom(boxed) => boxed.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl Clone for ClaimValue {
    fn clone(&self) -> Self {
        match self {
            ClaimValue::Null => ClaimValue::Null,
            ClaimValue::Bool(b) => ClaimValue::Bool(*b),
            ClaimValue::Number(n) => ClaimValue::Number(n.clone()),
            ClaimValue::String(s) => ClaimValue::String(s.clone()),
            ClaimValue::Array(items) => ClaimValue::Array(items.clone()),
            ClaimValue::Object(map) => ClaimValue::Object(map.clone()),
            ClaimValue::Custom(c) => ClaimValue::Custom(c.clone_dyn()),
        }
    }
}

impl PartialEq for ClaimValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ClaimValue::Null, ClaimValue::Null) => true,
            (ClaimValue::Bool(a), ClaimValue::Bool(b)) => a == b,
            (ClaimValue::Number(a), ClaimValue::Number(b)) => a == b,
            (ClaimValue::String(a), ClaimValue::String(b)) => a == b,
            (ClaimValue::Array(a), ClaimValue::Array(b)) => a == b,
            (ClaimValue::Object(a), ClaimValue::Object(b)) => a == b,
            (ClaimValue::Custom(a), ClaimValue::Custom(b)) => a.eq_dyn(b.as_ref()),
            _ => false,
        }
    }
}

impl From<serde_json::Value> for ClaimValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ClaimValue::Null,
            serde_json::Value::Bool(b) => ClaimValue::Bool(b),
            serde_json::Value::Number(n) => ClaimValue::Number(n),
            serde_json::Value::String(s) => ClaimValue::String(s),
            serde_json::Value::Array(items) => {
                ClaimValue::Array(items.into_iter().map(ClaimValue::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k, ClaimValue::from(v));
                }
                ClaimValue::Object(out)
            }
        }
    }
}

impl TryFrom<&ClaimValue> for serde_json::Value {
    type Error = crate::error::Error;

    /// Renders the JSON-shaped variants directly. `Custom` values are not
    /// representable this way in general — callers go through the claim
    /// registry instead, which dispatches to the owning codec.
    fn try_from(value: &ClaimValue) -> Result<Self, Self::Error> {
        Ok(match value {
            ClaimValue::Null => serde_json::Value::Null,
            ClaimValue::Bool(b) => serde_json::Value::Bool(*b),
            ClaimValue::Number(n) => serde_json::Value::Number(n.clone()),
            ClaimValue::String(s) => serde_json::Value::String(s.clone()),
            ClaimValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(serde_json::Value::try_from(item)?);
                }
                serde_json::Value::Array(out)
            }
            ClaimValue::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), serde_json::Value::try_from(v)?);
                }
                serde_json::Value::Object(out)
            }
            ClaimValue::Custom(c) => return Ok(c.to_json()),
        })
    }
}
