//! Error taxonomy for the encode (component D) and decode (component E) directions.
use thiserror::Error;

/// DAG → CBOR mapping failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// An integer was out of `[-2^64, 2^64 - 1]`, or a float was NaN/infinite.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// A map had a duplicate key once sorted (the only structural key fault
    /// on encode; non-text keys can't occur because `Value::Map` only holds
    /// `String` keys).
    #[error("invalid map key: {0}")]
    InvalidMapKey(String),
    /// Reserved: the encoder always sorts map entries itself, so this is
    /// currently unreachable.
    #[error("unsorted map keys")]
    UnsortedMapKeys,
    /// The hand-rolled framer failed to write the encoded bytes.
    #[error("cbor framing error: {0}")]
    Io(String),
    /// The recursion-depth guard tripped while mapping an adversarially
    /// nested `Value` tree onto CBOR.
    #[error("recursion depth limit exceeded")]
    DepthLimitExceeded,
}

impl From<std::io::Error> for EncodeError {
    fn from(e: std::io::Error) -> Self {
        EncodeError::Io(e.to_string())
    }
}

/// CBOR → DAG mapping failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A CBOR tag other than 42 was encountered.
    #[error("invalid tag {0}")]
    InvalidTag(u64),
    /// A CBOR map had a non-text key.
    #[error("invalid map key: {0}")]
    InvalidMapKey(String),
    /// A tag-42 payload was not a byte string, or failed CID/multibase parsing.
    #[error("invalid cid format: {0}")]
    InvalidCidFormat(String),
    /// A major-type-7 simple value other than `true`/`false`/`null`/a float.
    #[error("unsupported primitive: {0}")]
    UnsupportedPrimitive(String),
    /// A float decoded to NaN or ±infinity.
    #[error("float conversion error: {0}")]
    FloatConversionError(String),
    /// An integer did not fit the DAG-CBOR range.
    #[error("integer out of range: {0}")]
    IntegerOutOfRange(String),
    /// The hand-rolled framer failed to parse the input bytes: truncated
    /// input, a reserved additional-info value, or an indefinite-length
    /// item (DAG-CBOR has none of the latter two).
    #[error("cbor framing error: {0}")]
    Io(String),
    /// The recursion-depth guard tripped while walking adversarially nested input.
    #[error("recursion depth limit exceeded")]
    DepthLimitExceeded,
}

impl From<std::io::Error> for DecodeError {
    fn from(e: std::io::Error) -> Self {
        DecodeError::Io(e.to_string())
    }
}

impl From<dcbor_core::cid_framing::CidFormatError> for DecodeError {
    fn from(e: dcbor_core::cid_framing::CidFormatError) -> Self {
        DecodeError::InvalidCidFormat(e.to_string())
    }
}
