//! Bencode decoding and encoding.
//!
//! Four shapes make up the format: integers (`i42e`), byte strings (`4:spam`),
//! lists (`l...e`) and dictionaries (`d...e`). Values can be read into a
//! dynamic [`Value`] tree, or straight into host types implementing [`Decode`]
//! and written from any type implementing [`Encode`].
//!
//! Byte sequences use [`bytes::Bytes`]; a `Vec<u8>` is a list of integers.
//! Decoding does not check canonical form: leading zeros and unsorted keys are
//! accepted. Dynamic dictionaries and typed maps are always written with
//! sorted keys; records follow field declaration order.
//!
//! ```
//! use benc::bencode::{Value, from_bytes, to_bytes};
//!
//! let value = from_bytes(b"d3:cow3:moo4:spaml1:a1:bee").unwrap();
//! assert_eq!(value.get(b"cow").and_then(Value::as_str), Some("moo"));
//! assert_eq!(to_bytes(&value).unwrap(), b"d3:cow3:moo4:spaml1:a1:bee");
//! ```

mod decode;
mod encode;
mod error;
mod impls;
mod resolve;
mod source;
mod value;

/// Decoder, typed decode capability, and decode entry points.
pub use decode::{Decode, DecodeOptions, Decoder, Integer, Token, decode, decode_into, decode_with_options, from_bytes, from_bytes_into, from_bytes_with_options};
/// Encoder, typed encode capability, and encode entry points.
pub use encode::{Encode, Encoder, encode, to_bytes};
/// Error and result aliases.
pub use error::{BencodeError, ErrorKind, Result};
/// Key types accepted by typed map targets.
pub use impls::MapKey;
/// Record field mapping and integer width resolution.
pub use resolve::{BoundedInt, FieldDecl, FieldMap, IntWidth, Record, decode_record, encode_record};
/// Dynamic value tree.
pub use value::Value;
