//! The DAG-CBOR value model (component A).
use cid::Cid;

/// A decoded, or to-be-encoded, DAG-CBOR value.
///
/// `Value` is a tagged union over exactly the nine kinds DAG-CBOR's data
/// model admits. Maps are represented as a `Vec` of pairs rather than a
/// `BTreeMap`: entry order is semantically significant (it is how
/// canonicalisation is observed), and DAG-CBOR's sort order does not agree
/// with `Ord for str`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Represents the absence of a value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A signed integer. Must fit `[-2^64, 2^64 - 1]` to be encodable.
    Int(i128),
    /// An IEEE-754 binary64 float. Must be finite and non-NaN to be encodable.
    Float(f64),
    /// A UTF-8 string.
    Text(String),
    /// An opaque sequence of bytes.
    Bytes(Vec<u8>),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An ordered sequence of (text key, value) pairs. Canonical once sorted
    /// by [`crate::map::key_cmp`] with no duplicate keys.
    Map(Vec<(String, Value)>),
    /// A content identifier, framed on the wire per [`crate::cid_framing`].
    Cid(Cid),
}

impl Value {
    /// Returns the discriminant name of this value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Cid(_) => "cid",
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<Cid> for Value {
    fn from(v: Cid) -> Self {
        Value::Cid(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(v: Vec<(String, Value)>) -> Self {
        Value::Map(v)
    }
}

#[cfg(feature = "arb")]
mod arb {
    //! `quickcheck::Arbitrary` for [`Value`], gated behind the `arb` feature
    //! the same way the reference `core/Cargo.toml` exposes one for `Ipld`.
    //! Generated maps never carry duplicate keys (collisions are folded by
    //! last-write-wins before construction) so every tree this produces is
    //! accepted by the encoder without an `InvalidMapKey` roll of the dice.
    use std::collections::BTreeMap;

    use quickcheck::{Arbitrary, Gen};

    use super::Value;

    impl Arbitrary for Value {
        fn arbitrary(g: &mut Gen) -> Self {
            arbitrary_sized(g, g.size())
        }
    }

    fn arbitrary_sized(g: &mut Gen, size: usize) -> Value {
        if size == 0 {
            return arbitrary_leaf(g);
        }
        match u8::arbitrary(g) % 3 {
            0 => {
                let len = u8::arbitrary(g) as usize % 4;
                Value::Array((0..len).map(|_| arbitrary_sized(g, size / 2)).collect())
            }
            1 => {
                let len = u8::arbitrary(g) as usize % 4;
                let mut entries: BTreeMap<String, Value> = BTreeMap::new();
                for _ in 0..len {
                    entries.insert(arbitrary_key(g), arbitrary_sized(g, size / 2));
                }
                Value::Map(entries.into_iter().collect())
            }
            _ => arbitrary_leaf(g),
        }
    }

    fn arbitrary_leaf(g: &mut Gen) -> Value {
        match u8::arbitrary(g) % 6 {
            0 => Value::Null,
            1 => Value::Bool(bool::arbitrary(g)),
            2 => Value::Int(arbitrary_int(g)),
            3 => Value::Float(arbitrary_finite_float(g)),
            4 => Value::Text(arbitrary_key(g)),
            _ => Value::Bytes(Vec::<u8>::arbitrary(g)),
        }
    }

    /// A signed integer within DAG-CBOR's wider-than-`i64` wire range,
    /// built from a `u64` magnitude and a sign so the full `[-2^64, 2^64-1]`
    /// boundary is reachable, not just the `i64` subset `i128::arbitrary`
    /// would otherwise favor.
    fn arbitrary_int(g: &mut Gen) -> i128 {
        let magnitude = u64::arbitrary(g) as i128;
        if bool::arbitrary(g) {
            magnitude
        } else {
            -1 - magnitude
        }
    }

    fn arbitrary_finite_float(g: &mut Gen) -> f64 {
        let f = f64::arbitrary(g);
        if f.is_finite() {
            f
        } else {
            0.0
        }
    }

    fn arbitrary_key(g: &mut Gen) -> String {
        let len = u8::arbitrary(g) as usize % 6;
        (0..len)
            .map(|_| *g.choose(&['a', 'b', 'c', 'z', 'A', 'Z', 'é']).unwrap())
            .collect()
    }
}
