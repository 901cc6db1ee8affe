//! Deterministic map-key ordering (component B of the DAG-CBOR profile).
//!
//! DAG-CBOR maps are sorted length-first, then lexicographically over the
//! UTF-8 bytes of the key. This is *not* the order a plain `Ord for str`
//! comparison gives: `"z" < "aa"` here because `"z"` is shorter, even though
//! byte-for-byte `'z' > 'a'`.
use std::cmp::Ordering;

use crate::value::Value;

/// Compares two map keys using DAG-CBOR's canonical order: length of the
/// UTF-8 encoding first, then lexicographic over the UTF-8 bytes.
pub fn key_cmp(a: &str, b: &str) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

/// Sorts `entries` into canonical order in place.
pub fn sort_entries(entries: &mut [(String, Value)]) {
    entries.sort_by(|(a, _), (b, _)| key_cmp(a, b));
}

/// Returns the first duplicate key found in an already-sorted entry list, if any.
///
/// Must be called after [`sort_entries`]: duplicates are detected by scanning
/// adjacent pairs, which only catches equal keys once equal keys are adjacent.
pub fn first_duplicate(sorted_entries: &[(String, Value)]) -> Option<&str> {
    sorted_entries
        .windows(2)
        .find(|w| w[0].0 == w[1].0)
        .map(|w| w[0].0.as_str())
}

/// Sorts `entries` into canonical order and reports the first duplicate key, if any.
///
/// On success the entries are left sorted; on failure (a duplicate was
/// found) the entries are still sorted, but the caller should treat the map
/// as invalid.
pub fn canonicalize(entries: &mut Vec<(String, Value)>) -> Result<(), String> {
    sort_entries(entries);
    if let Some(key) = first_duplicate(entries) {
        return Err(key.to_string());
    }
    Ok(())
}
