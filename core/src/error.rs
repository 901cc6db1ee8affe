//! Error types for the path/accessor layer.
use thiserror::Error;

/// A path query or typed accessor failed.
///
/// Unlike the codec's errors, `AccessError` never results from malformed
/// input text: [`crate::path::parse_path`] never fails (see its docs). It is
/// only returned by the typed `get_as_*`/`get_as_nullable_*` family once a
/// path has been resolved against a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The path did not resolve to any value and a value was required.
    #[error("path not found")]
    PathNotFound,
    /// The path resolved to a value of a different kind than requested.
    #[error("type mismatch")]
    TypeMismatch,
}
