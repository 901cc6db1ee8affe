//! A hand-rolled generic CBOR framer (the "external collaborator" of
//! RFC 8949 major types), kept deliberately ignorant of DAG-CBOR's
//! restrictions. It writes/reads a [`CborValue`] tree; [`crate::dag`] is
//! the layer that enforces DAG-CBOR semantics on top of it.
//!
//! Modeled on the reference `libipld-cbor` encode/decode modules: the same
//! big-endian `write_uN`/`read_uN` helpers, the same `Major` byte
//! decomposition, generalized to operate on a value tree instead of one
//! `Encode`/`Decode` impl per Rust type.
use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder};

use crate::error::{DecodeError, EncodeError};

/// Recursion depth cap for both directions of the framer (component §5's
/// "guard against stack overflow on adversarial input").
pub const MAX_DEPTH: usize = 512;

/// A generic CBOR value: one node of RFC 8949's major-type tree, with no
/// DAG-CBOR restrictions applied. Map keys are themselves `CborValue`s
/// because generic CBOR permits any key type; it is [`crate::dag`]'s job to
/// reject the non-text ones.
#[derive(Clone, Debug, PartialEq)]
pub enum CborValue {
    /// Major type 0.
    Uint(u64),
    /// Major type 1. The represented integer is `-1 - n`.
    Nint(u64),
    /// Major type 2.
    Bytes(Vec<u8>),
    /// Major type 3.
    Text(String),
    /// Major type 4.
    Array(Vec<CborValue>),
    /// Major type 5.
    Map(Vec<(CborValue, CborValue)>),
    /// Major type 6.
    Tag(u64, Box<CborValue>),
    /// Major type 7, info 20/21.
    Bool(bool),
    /// Major type 7, info 22.
    Null,
    /// Major type 7, info 26/27 (32- or 64-bit float, always widened to `f64`).
    Float(f64),
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Major(u8);

impl Major {
    const fn with(kind: u8, info: u8) -> Self {
        Major((kind << 5) | info)
    }

    const fn kind(self) -> u8 {
        self.0 >> 5
    }

    const fn info(self) -> u8 {
        self.0 & 0x1f
    }
}

const KIND_UINT: u8 = 0;
const KIND_NINT: u8 = 1;
const KIND_BYTES: u8 = 2;
const KIND_TEXT: u8 = 3;
const KIND_ARRAY: u8 = 4;
const KIND_MAP: u8 = 5;
const KIND_TAG: u8 = 6;
const KIND_OTHER: u8 = 7;

const FALSE: Major = Major::with(KIND_OTHER, 20);
const TRUE: Major = Major::with(KIND_OTHER, 21);
const NULL: Major = Major::with(KIND_OTHER, 22);
const F32: Major = Major::with(KIND_OTHER, 26);
const F64: Major = Major::with(KIND_OTHER, 27);

fn read_u8(r: &mut impl Read) -> Result<u8, DecodeError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16(r: &mut impl Read) -> Result<u16, DecodeError> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(BigEndian::read_u16(&buf))
}

fn read_u32(r: &mut impl Read) -> Result<u32, DecodeError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(BigEndian::read_u32(&buf))
}

fn read_u64(r: &mut impl Read) -> Result<u64, DecodeError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(BigEndian::read_u64(&buf))
}

fn read_major(r: &mut impl Read) -> Result<Major, DecodeError> {
    let byte = read_u8(r)?;
    // Additional-info values 28-30 are reserved and 31 means
    // indefinite-length; DAG-CBOR has neither, so both are rejected here,
    // uniformly across every major type, before any mapping logic sees them.
    if byte & 0b0001_1100 == 0b0001_1100 {
        return Err(DecodeError::Io(format!(
            "reserved or indefinite-length additional info in byte {byte:#04x}"
        )));
    }
    Ok(Major(byte))
}

/// Reads the argument ("additional info") of a major byte as a `u64`,
/// accepting any encoding width (the decoder does not enforce minimal
/// integer encoding, a deliberate lenient-decode policy).
fn read_arg(r: &mut impl Read, major: Major) -> Result<u64, DecodeError> {
    match major.info() {
        v @ 0..=23 => Ok(v as u64),
        24 => Ok(read_u8(r)? as u64),
        25 => Ok(read_u16(r)? as u64),
        26 => Ok(read_u32(r)? as u64),
        27 => read_u64(r),
        other => unreachable!("reserved/indefinite info {other} rejected by read_major"),
    }
}

fn read_bytes(r: &mut impl Read, len: u64) -> Result<Vec<u8>, DecodeError> {
    let len = usize::try_from(len)
        .map_err(|_| DecodeError::Io(format!("length {len} out of range")))?;
    let mut buf = Vec::with_capacity(len.min(16 * 1024));
    r.take(len as u64).read_to_end(&mut buf)?;
    if buf.len() != len {
        return Err(DecodeError::Io("unexpected end of input".to_string()));
    }
    Ok(buf)
}

fn check_depth(depth: usize) -> Result<(), DecodeError> {
    if depth > MAX_DEPTH {
        return Err(DecodeError::DepthLimitExceeded);
    }
    Ok(())
}

impl CborValue {
    /// Parses exactly one complete CBOR item from `r`.
    pub fn read(r: &mut impl Read) -> Result<Self, DecodeError> {
        Self::read_depth(r, 0)
    }

    fn read_depth(r: &mut impl Read, depth: usize) -> Result<Self, DecodeError> {
        check_depth(depth)?;
        let major = read_major(r)?;
        Ok(match major.kind() {
            KIND_UINT => CborValue::Uint(read_arg(r, major)?),
            KIND_NINT => CborValue::Nint(read_arg(r, major)?),
            KIND_BYTES => {
                let len = read_arg(r, major)?;
                CborValue::Bytes(read_bytes(r, len)?)
            }
            KIND_TEXT => {
                let len = read_arg(r, major)?;
                let bytes = read_bytes(r, len)?;
                CborValue::Text(
                    String::from_utf8(bytes)
                        .map_err(|e| DecodeError::Io(format!("invalid utf-8: {e}")))?,
                )
            }
            KIND_ARRAY => {
                let len = read_arg(r, major)?;
                let mut items = Vec::with_capacity((len as usize).min(4096));
                for _ in 0..len {
                    items.push(Self::read_depth(r, depth + 1)?);
                }
                CborValue::Array(items)
            }
            KIND_MAP => {
                let len = read_arg(r, major)?;
                let mut entries = Vec::with_capacity((len as usize).min(4096));
                for _ in 0..len {
                    let key = Self::read_depth(r, depth + 1)?;
                    let value = Self::read_depth(r, depth + 1)?;
                    entries.push((key, value));
                }
                CborValue::Map(entries)
            }
            KIND_TAG => {
                let tag = read_arg(r, major)?;
                CborValue::Tag(tag, Box::new(Self::read_depth(r, depth + 1)?))
            }
            KIND_OTHER => match major {
                FALSE => CborValue::Bool(false),
                TRUE => CborValue::Bool(true),
                NULL => CborValue::Null,
                F32 => CborValue::Float(f32::from_bits(read_u32(r)?) as f64),
                F64 => CborValue::Float(f64::from_bits(read_u64(r)?)),
                Major(byte) => {
                    return Err(DecodeError::UnsupportedPrimitive(format!(
                        "simple value {byte:#04x}"
                    )))
                }
            },
            _ => unreachable!("major kind is a 3-bit value"),
        })
    }

    /// Serializes this value into `w` using the minimal-width encoding for
    /// every length/argument (canonical on the wire).
    pub fn write(&self, w: &mut impl Write) -> Result<(), EncodeError> {
        match self {
            CborValue::Uint(n) => write_arg(w, KIND_UINT, *n),
            CborValue::Nint(n) => write_arg(w, KIND_NINT, *n),
            CborValue::Bytes(b) => {
                write_arg(w, KIND_BYTES, b.len() as u64)?;
                Ok(w.write_all(b)?)
            }
            CborValue::Text(s) => {
                write_arg(w, KIND_TEXT, s.len() as u64)?;
                Ok(w.write_all(s.as_bytes())?)
            }
            CborValue::Array(items) => {
                write_arg(w, KIND_ARRAY, items.len() as u64)?;
                for item in items {
                    item.write(w)?;
                }
                Ok(())
            }
            CborValue::Map(entries) => {
                write_arg(w, KIND_MAP, entries.len() as u64)?;
                for (k, v) in entries {
                    k.write(w)?;
                    v.write(w)?;
                }
                Ok(())
            }
            CborValue::Tag(tag, inner) => {
                write_arg(w, KIND_TAG, *tag)?;
                inner.write(w)
            }
            CborValue::Bool(b) => Ok(w.write_all(&[if *b { TRUE.0 } else { FALSE.0 }])?),
            CborValue::Null => Ok(w.write_all(&[NULL.0])?),
            CborValue::Float(f) => {
                let mut buf = [F64.0, 0, 0, 0, 0, 0, 0, 0, 0];
                BigEndian::write_f64(&mut buf[1..], *f);
                Ok(w.write_all(&buf)?)
            }
        }
    }
}

fn write_arg(w: &mut impl Write, kind: u8, value: u64) -> Result<(), EncodeError> {
    if value <= 23 {
        w.write_all(&[(kind << 5) | value as u8])?;
    } else if value <= u8::MAX as u64 {
        w.write_all(&[(kind << 5) | 24, value as u8])?;
    } else if value <= u16::MAX as u64 {
        let mut buf = [(kind << 5) | 25, 0, 0];
        BigEndian::write_u16(&mut buf[1..], value as u16);
        w.write_all(&buf)?;
    } else if value <= u32::MAX as u64 {
        let mut buf = [(kind << 5) | 26, 0, 0, 0, 0];
        BigEndian::write_u32(&mut buf[1..], value as u32);
        w.write_all(&buf)?;
    } else {
        let mut buf = [(kind << 5) | 27, 0, 0, 0, 0, 0, 0, 0, 0];
        BigEndian::write_u64(&mut buf[1..], value);
        w.write_all(&buf)?;
    }
    Ok(())
}
