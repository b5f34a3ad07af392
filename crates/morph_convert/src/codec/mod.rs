//! The reference textual codec.
//!
//! A JSON encoding of reflected values with the interchange semantics the
//! converter reproduces: serialization names, `omitempty` and `string`
//! fields, sorted keys, integral floats printed as integers, case
//! insensitive field matching and in-place decoding into existing values.
//!
//! The converter falls back to it for values with text hooks and for
//! populated unions. Tests use it as the oracle the converter is checked
//! against.
//!
//! ```
//! use morph_convert::{FieldCache, codec};
//! use morph_reflect::Reflect;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Pair {
//!     #[morph(rename = "k")]
//!     pub key: String,
//!     #[morph(omitempty)]
//!     pub value: Option<i64>,
//! }
//!
//! let cache = FieldCache::new();
//! let pair = Pair { key: "a".into(), value: None };
//! let bytes = codec::marshal(&pair, &cache).unwrap();
//! assert_eq!(bytes, br#"{"k":"a"}"#);
//!
//! let mut back = Pair::default();
//! codec::unmarshal(br#"{"K":"b","value":3}"#, &mut back, &cache).unwrap();
//! assert_eq!(back, Pair { key: "b".into(), value: Some(3) });
//! ```

mod decode;
mod encode;

use morph_reflect::Reflect;

use crate::{FieldCache, Result};

/// Encodes `value` as JSON.
pub fn marshal(value: &dyn Reflect, cache: &FieldCache) -> Result<Vec<u8>> {
    let json = encode::Encoder::new(cache).encode(value, 0)?;
    Ok(serde_json::to_vec(&json)?)
}

/// Decodes JSON into `dst`, in place.
///
/// Type mismatches do not stop decoding: the first one is reported after
/// every other value has been written.
pub fn unmarshal(bytes: &[u8], dst: &mut dyn Reflect, cache: &FieldCache) -> Result<()> {
    let json: serde_json::Value = serde_json::from_slice(bytes)?;
    decode::Decoder::new(cache).run(&json, dst)
}

/// Marshals `src` and unmarshals the result into `dst`.
pub fn round_trip(src: &dyn Reflect, dst: &mut dyn Reflect, cache: &FieldCache) -> Result<()> {
    let bytes = marshal(src, cache)?;
    unmarshal(&bytes, dst, cache)
}
