//! The DAG-CBOR wire codec: a hand-rolled CBOR framer ([`cbor`]) composed
//! with the DAG ↔ CBOR mappers ([`dag`]) that enforce the restricted,
//! deterministic profile IPLD calls DAG-CBOR.
#![deny(missing_docs)]

pub mod cbor;
pub mod dag;
pub mod error;

pub use cbor::CborValue;
pub use dag::{from_cbor, to_cbor};
pub use error::{DecodeError, EncodeError};

use dcbor_core::Value;

/// Encodes `value` to a freshly allocated byte buffer.
pub fn to_bytes(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    to_bytes_buffer(value, &mut buf)?;
    Ok(buf)
}

/// Encodes `value`, appending the wire bytes onto a caller-owned buffer.
pub fn to_bytes_buffer(value: &Value, buf: &mut Vec<u8>) -> Result<(), EncodeError> {
    let cbor = to_cbor(value)?;
    cbor.write(buf)
}

/// Decodes a complete [`Value`] from `bytes`.
///
/// Trailing bytes after the single top-level item are ignored, matching the
/// framer's single-item `read` contract; callers who need to detect trailing
/// garbage should track the reader position themselves via [`cbor::CborValue::read`].
pub fn from_bytes(bytes: &[u8]) -> Result<Value, DecodeError> {
    let cbor = CborValue::read(&mut &bytes[..])?;
    from_cbor(&cbor)
}
