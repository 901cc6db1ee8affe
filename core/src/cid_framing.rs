//! CID framing (component C): wrapping and unwrapping a [`cid::Cid`] as the
//! byte-string payload of CBOR tag 42.
//!
//! DAG-CBOR links are CBOR tag 42 around a byte string that is the CID's
//! binary encoding, prefixed with a single `0x00` byte, the code of
//! `multibase::Base::Identity`. The prefix exists so that a dag-cbor link,
//! if ever re-interpreted as a multibase string, is recognizable as
//! "already binary"; this codec only ever sees it as a byte, never as text.
use cid::Cid;
use thiserror::Error;

/// Tag reserved by IPLD to mark a CID payload.
pub const CID_TAG: u64 = 42;

/// The CID framing failed to decode.
#[derive(Debug, Error)]
pub enum CidFormatError {
    /// The tag-42 payload was empty; there was no multibase prefix to read.
    #[error("empty cid payload")]
    Empty,
    /// The tag-42 payload's multibase prefix was not the identity base.
    #[error("unsupported multibase prefix {0:#04x}, only identity (0x00) is accepted")]
    UnsupportedBase(u8),
    /// The bytes following the identity prefix did not parse as a CID.
    #[error("invalid cid: {0}")]
    InvalidCid(#[from] cid::Error),
}

fn identity_prefix() -> u8 {
    multibase::Base::Identity.code() as u8
}

/// Prepends the identity multibase prefix to a CID's binary encoding,
/// producing the byte string carried by CBOR tag 42.
pub fn wrap(cid: &Cid) -> Vec<u8> {
    let bytes = cid.to_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 1);
    out.push(identity_prefix());
    out.extend_from_slice(&bytes);
    out
}

/// Recovers a CID from the byte string payload of CBOR tag 42.
///
/// Rejects any multibase prefix other than identity, and any bytes that
/// don't parse as a binary CID.
pub fn unwrap(framed: &[u8]) -> Result<Cid, CidFormatError> {
    let (prefix, rest) = framed.split_first().ok_or(CidFormatError::Empty)?;
    if *prefix != identity_prefix() {
        return Err(CidFormatError::UnsupportedBase(*prefix));
    }
    Ok(Cid::read_bytes(rest)?)
}
