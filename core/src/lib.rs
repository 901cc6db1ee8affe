//! Value model, map-key discipline, CID framing and the path query engine
//! shared by the DAG-CBOR codec.
#![deny(missing_docs)]

pub mod access;
pub mod cid_framing;
pub mod error;
pub mod map;
pub mod path;
pub mod value;

pub use cid;
pub use multibase;
pub use multihash;

pub use access::{AccessResult, Kind, TypedKind};
pub use error::AccessError;
pub use path::{parse_path, Step};
pub use value::Value;
