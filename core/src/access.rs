//! Path evaluation and typed accessors (component H).
//!
//! [`get`] walks a [`Value`] tree by a parsed [`Step`] sequence. The typed
//! `get_as_*`/`get_as_nullable_*`/`is_null` functions layer a type
//! predicate on top, distinguishing *absent*, *present and null*, and
//! *present with the wrong kind* as three disjoint outcomes.
use cid::Cid;

use crate::error::AccessError;
use crate::path::{parse_path, Step};
use crate::value::Value;

/// Result type shared by the typed accessor family.
pub type AccessResult<T> = Result<T, AccessError>;

/// Evaluates a parsed path against a value.
///
/// Returns `None` if the path does not resolve (a missing key, an
/// out-of-range index, or a step applied to a value of the wrong shape).
/// A `Wildcard` step always resolves to `Some(Value::Array(..))`, even if
/// every element it maps over comes back absent. See the module docs on
/// [`crate::path`] for the wildcard-flattening caveat.
pub fn eval(value: &Value, steps: &[Step]) -> Option<Value> {
    let (step, rest) = match steps.split_first() {
        None => return Some(value.clone()),
        Some(pair) => pair,
    };
    match (step, value) {
        (Step::Key(key), Value::Map(entries)) => entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| eval(v, rest)),
        (Step::Index(index), Value::Array(items)) => {
            items.get(*index).and_then(|v| eval(v, rest))
        }
        (Step::Wildcard, Value::Map(entries)) => Some(Value::Array(
            entries.iter().filter_map(|(_, v)| eval(v, rest)).collect(),
        )),
        (Step::Wildcard, Value::Array(items)) => {
            Some(Value::Array(items.iter().filter_map(|v| eval(v, rest)).collect()))
        }
        _ => None,
    }
}

/// Evaluates a path string against a value. Equivalent to
/// `eval(value, &parse_path(path))`.
pub fn get(value: &Value, path: &str) -> Option<Value> {
    eval(value, &parse_path(path))
}

/// A target kind a typed accessor can coerce a resolved value into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// A non-negative integer (rejects negative `Int` payloads as a mismatch).
    Nat,
    /// Any integer.
    Int,
    /// A float, widening an `Int` payload if encountered.
    Float,
    /// A boolean.
    Bool,
    /// A UTF-8 string.
    Text,
    /// An array of values.
    Array,
    /// A map of (text key, value) pairs.
    Map,
    /// An opaque byte sequence.
    Bytes,
    /// A content identifier.
    Cid,
}

/// A Rust type that a resolved [`Value`] can be coerced into by the typed
/// accessor family.
///
/// The "kind coercions" are intentionally narrow: [`u64`] (`Nat`) accepts
/// only non-negative `Int` payloads, and [`f64`] (`Float`) additionally
/// accepts an `Int` payload, widening it. Every other pairing is a type
/// mismatch, never a distinct error.
pub trait TypedKind: Sized {
    /// The kind this type corresponds to, for diagnostics.
    const KIND: Kind;

    /// Attempts to coerce a resolved value into `Self`.
    fn from_value(value: &Value) -> Option<Self>;
}

impl TypedKind for u64 {
    const KIND: Kind = Kind::Nat;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) if *i >= 0 && *i <= u64::MAX as i128 => Some(*i as u64),
            _ => None,
        }
    }
}

impl TypedKind for i128 {
    const KIND: Kind = Kind::Int;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl TypedKind for f64 {
    const KIND: Kind = Kind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl TypedKind for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl TypedKind for String {
    const KIND: Kind = Kind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl TypedKind for Vec<Value> {
    const KIND: Kind = Kind::Array;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl TypedKind for Vec<(String, Value)> {
    const KIND: Kind = Kind::Map;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Map(entries) => Some(entries.clone()),
            _ => None,
        }
    }
}

impl TypedKind for Vec<u8> {
    const KIND: Kind = Kind::Bytes;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl TypedKind for Cid {
    const KIND: Kind = Kind::Cid;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Cid(c) => Some(c.clone()),
            _ => None,
        }
    }
}

/// Resolves `path` against `value` and coerces the result into `K`,
/// treating a present `Null` as `None` and an absent path as `None` only
/// when `allow_missing` is set.
pub fn get_as_nullable<K: TypedKind>(
    value: &Value,
    path: &str,
    allow_missing: bool,
) -> AccessResult<Option<K>> {
    match get(value, path) {
        None => {
            if allow_missing {
                Ok(None)
            } else {
                Err(AccessError::PathNotFound)
            }
        }
        Some(Value::Null) => Ok(None),
        Some(resolved) => match K::from_value(&resolved) {
            Some(k) => Ok(Some(k)),
            None => Err(AccessError::TypeMismatch),
        },
    }
}

/// Resolves `path` against `value` and coerces the result into `K`.
///
/// A present `Null` is a `TypeMismatch` here, since a non-nullable request
/// cannot be satisfied by the absence of a value.
pub fn get_as<K: TypedKind>(value: &Value, path: &str) -> AccessResult<K> {
    match get_as_nullable::<K>(value, path, false)? {
        Some(k) => Ok(k),
        None => Err(AccessError::TypeMismatch),
    }
}

/// Returns whether the value at `path` is present and `Null`, or absent
/// with `allow_missing` set.
pub fn is_null(value: &Value, path: &str, allow_missing: bool) -> bool {
    match get(value, path) {
        Some(Value::Null) => true,
        Some(_) => false,
        None => allow_missing,
    }
}

// The named `get_as_*` matrix below hand-instantiates the generic engine
// above once per `K`, in the style of the reference `derive_ipld!` macro
// (`core/src/untyped.rs`): one generic implementation, nine thin named
// wrappers generated by a small macro rather than duplicated by hand.
macro_rules! accessor {
    ($get:ident, $get_nullable:ident, $ty:ty, $doc:expr) => {
        #[doc = $doc]
        pub fn $get(value: &Value, path: &str) -> AccessResult<$ty> {
            get_as::<$ty>(value, path)
        }

        #[doc = concat!("Nullable variant of [`", stringify!($get), "`].")]
        pub fn $get_nullable(
            value: &Value,
            path: &str,
            allow_missing: bool,
        ) -> AccessResult<Option<$ty>> {
            get_as_nullable::<$ty>(value, path, allow_missing)
        }
    };
}

accessor!(get_as_nat, get_as_nullable_nat, u64, "Coerces the resolved value into a non-negative integer.");
accessor!(get_as_int, get_as_nullable_int, i128, "Coerces the resolved value into an integer.");
accessor!(get_as_float, get_as_nullable_float, f64, "Coerces the resolved value into a float, widening an integer payload.");
accessor!(get_as_bool, get_as_nullable_bool, bool, "Coerces the resolved value into a boolean.");
accessor!(get_as_text, get_as_nullable_text, String, "Coerces the resolved value into a UTF-8 string.");
accessor!(get_as_array, get_as_nullable_array, Vec<Value>, "Coerces the resolved value into an array.");
accessor!(get_as_map, get_as_nullable_map, Vec<(String, Value)>, "Coerces the resolved value into a map.");
accessor!(get_as_bytes, get_as_nullable_bytes, Vec<u8>, "Coerces the resolved value into a byte sequence.");
accessor!(get_as_cid, get_as_nullable_cid, Cid, "Coerces the resolved value into a content identifier.");
