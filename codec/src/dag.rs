//! The DAG ↔ CBOR mappers (components D and E): translating between
//! [`dcbor_core::Value`] and the generic [`CborValue`] tree.
//!
//! Grounded in the reference `libipld-cbor` `Encode<DagCbor> for Ipld`/
//! `Decode<DagCbor> for Ipld` impls, generalized from direct trait dispatch
//! over a fused framer to two plain recursive functions over an intermediate
//! tree, since the public surface here exposes `to_cbor`/`from_cbor`
//! independently of the byte-level framer.
use dcbor_core::cid_framing;
use dcbor_core::map;
use dcbor_core::Value;

use crate::cbor::{CborValue, MAX_DEPTH};
use crate::error::{DecodeError, EncodeError};

const MAX_INT: i128 = u64::MAX as i128;
const MIN_INT: i128 = -(u64::MAX as i128) - 1;

/// Component D: maps a [`Value`] onto the generic CBOR tree.
///
/// Entry point for callers; internally threads the same recursion-depth
/// counter the framer's reader uses, so an adversarially nested `Value`
/// tree (a caller's own construction may not have been bounded by the
/// decoder's depth cap, e.g. one assembled programmatically rather than
/// produced by `from_bytes`) errors instead of overflowing the stack.
pub fn to_cbor(value: &Value) -> Result<CborValue, EncodeError> {
    to_cbor_depth(value, 0)
}

fn check_depth(depth: usize) -> Result<(), EncodeError> {
    if depth > MAX_DEPTH {
        return Err(EncodeError::DepthLimitExceeded);
    }
    Ok(())
}

fn to_cbor_depth(value: &Value, depth: usize) -> Result<CborValue, EncodeError> {
    check_depth(depth)?;
    Ok(match value {
        Value::Null => CborValue::Null,
        Value::Bool(b) => CborValue::Bool(*b),
        Value::Int(n) => {
            if *n < MIN_INT || *n > MAX_INT {
                return Err(EncodeError::InvalidValue(format!(
                    "integer {n} out of range [-2^64, 2^64 - 1]"
                )));
            }
            if *n >= 0 {
                CborValue::Uint(*n as u64)
            } else {
                CborValue::Nint((-1 - *n) as u64)
            }
        }
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(EncodeError::InvalidValue(format!("non-finite float {f}")));
            }
            CborValue::Float(*f)
        }
        Value::Text(s) => CborValue::Text(s.clone()),
        Value::Bytes(b) => CborValue::Bytes(b.clone()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(to_cbor_depth(item, depth + 1)?);
            }
            CborValue::Array(out)
        }
        Value::Map(entries) => {
            let mut entries = entries.clone();
            map::canonicalize(&mut entries).map_err(EncodeError::InvalidMapKey)?;
            let mut out = Vec::with_capacity(entries.len());
            for (k, v) in &entries {
                out.push((CborValue::Text(k.clone()), to_cbor_depth(v, depth + 1)?));
            }
            CborValue::Map(out)
        }
        Value::Cid(cid) => CborValue::Tag(
            cid_framing::CID_TAG,
            Box::new(CborValue::Bytes(cid_framing::wrap(cid))),
        ),
    })
}

/// Component E: maps a generic CBOR tree back onto a [`Value`].
///
/// Decoded maps are always returned sorted and duplicate-free: `from_cbor`
/// canonicalizes even when the wire bytes were not sorted (§4.E's
/// lenient-decode policy) so every `Value` this crate ever hands back
/// upholds the canonical-map invariant.
pub fn from_cbor(cbor: &CborValue) -> Result<Value, DecodeError> {
    Ok(match cbor {
        CborValue::Uint(n) => Value::Int(*n as i128),
        CborValue::Nint(n) => Value::Int(-1 - *n as i128),
        CborValue::Bytes(b) => Value::Bytes(b.clone()),
        CborValue::Text(s) => Value::Text(s.clone()),
        CborValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(from_cbor(item)?);
            }
            Value::Array(out)
        }
        CborValue::Map(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k {
                    CborValue::Text(s) => s.clone(),
                    other => {
                        return Err(DecodeError::InvalidMapKey(format!(
                            "non-text map key of kind {}",
                            kind_name(other)
                        )))
                    }
                };
                out.push((key, from_cbor(v)?));
            }
            map::canonicalize(&mut out).map_err(DecodeError::InvalidMapKey)?;
            Value::Map(out)
        }
        CborValue::Tag(42, payload) => {
            let bytes = match payload.as_ref() {
                CborValue::Bytes(b) => b,
                other => {
                    return Err(DecodeError::InvalidCidFormat(format!(
                        "tag 42 payload was {}, not a byte string",
                        kind_name(other)
                    )))
                }
            };
            Value::Cid(cid_framing::unwrap(bytes)?)
        }
        CborValue::Tag(tag, _) => return Err(DecodeError::InvalidTag(*tag)),
        CborValue::Bool(b) => Value::Bool(*b),
        CborValue::Null => Value::Null,
        CborValue::Float(f) => {
            if !f.is_finite() {
                return Err(DecodeError::FloatConversionError(format!(
                    "non-finite float {f}"
                )));
            }
            Value::Float(*f)
        }
    })
}

fn kind_name(cbor: &CborValue) -> &'static str {
    match cbor {
        CborValue::Uint(_) => "unsigned integer",
        CborValue::Nint(_) => "negative integer",
        CborValue::Bytes(_) => "byte string",
        CborValue::Text(_) => "text string",
        CborValue::Array(_) => "array",
        CborValue::Map(_) => "map",
        CborValue::Tag(_, _) => "tag",
        CborValue::Bool(_) => "bool",
        CborValue::Null => "null",
        CborValue::Float(_) => "float",
    }
}
