//! `dcbor`: a DAG-CBOR codec and value-path query engine.
//!
//! This crate is a thin facade over [`dcbor_core`] (the value model,
//! map-key discipline, CID framing and path/accessor engine) and
//! [`dcbor_codec`] (the wire codec), re-exporting the full public surface
//! from one entry point.
#![deny(missing_docs)]

pub use dcbor_codec::{
    from_bytes, from_cbor, to_bytes, to_bytes_buffer, to_cbor, CborValue, DecodeError, EncodeError,
};
pub use dcbor_core::{
    access::{AccessResult, Kind, TypedKind},
    parse_path, AccessError, Step, Value,
};

pub use dcbor_core::access::{
    get, get_as_array, get_as_bool, get_as_bytes, get_as_cid, get_as_float, get_as_int,
    get_as_map, get_as_nat, get_as_nullable_array, get_as_nullable_bool, get_as_nullable_bytes,
    get_as_nullable_cid, get_as_nullable_float, get_as_nullable_int, get_as_nullable_map,
    get_as_nullable_nat, get_as_nullable_text, get_as_text, is_null,
};
