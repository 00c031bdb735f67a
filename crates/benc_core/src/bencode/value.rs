use std::collections::BTreeMap;

use bytes::Bytes;

/// Dynamic bencode value produced by untyped decode and consumed by untyped encode.
///
/// Byte strings are kept as raw bytes; [`Value::as_str`] is a UTF-8 view and
/// never re-encodes anything.
///
/// ```
/// use benc::bencode::{Value, from_bytes};
///
/// let value = from_bytes(b"d3:fooi42ee").unwrap();
/// assert_eq!(value.get(b"foo").and_then(Value::as_integer), Some(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
	/// Empty polymorphic slot. Never produced by decoding and not encodable.
	#[default]
	Absent,
	/// Signed 64-bit integer.
	Integer(i64),
	/// Raw byte string.
	Bytes(Bytes),
	/// Ordered list of values.
	List(Vec<Value>),
	/// Dictionary keyed by raw byte strings.
	Dict(BTreeMap<Bytes, Value>),
}

impl Value {
	/// Create a byte string value from UTF-8 text.
	pub fn string(text: &str) -> Self {
		Value::Bytes(Bytes::copy_from_slice(text.as_bytes()))
	}

	/// Stable lowercase label for the value shape.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Absent => "absent",
			Value::Integer(_) => "integer",
			Value::Bytes(_) => "string",
			Value::List(_) => "list",
			Value::Dict(_) => "dict",
		}
	}

	/// Whether this is the empty polymorphic slot.
	pub fn is_absent(&self) -> bool {
		matches!(self, Value::Absent)
	}

	/// Integer payload, if any.
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			Value::Integer(value) => Some(*value),
			_ => None,
		}
	}

	/// Byte string payload, if any.
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Value::Bytes(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Byte string payload viewed as UTF-8.
	///
	/// Returns `None` for non-strings and for byte strings that are not valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
			_ => None,
		}
	}

	/// List payload, if any.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	/// Dictionary payload, if any.
	pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
		match self {
			Value::Dict(entries) => Some(entries),
			_ => None,
		}
	}

	/// Consume the value and return its dictionary, if it is one.
	pub fn into_dict(self) -> Option<BTreeMap<Bytes, Value>> {
		match self {
			Value::Dict(entries) => Some(entries),
			_ => None,
		}
	}

	/// Look up `key` when this value is a dictionary.
	pub fn get(&self, key: &[u8]) -> Option<&Value> {
		self.as_dict()?.get(key)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<&str> for Value {
	fn from(text: &str) -> Self {
		Value::string(text)
	}
}

impl From<Bytes> for Value {
	fn from(bytes: Bytes) -> Self {
		Value::Bytes(bytes)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Value::List(items)
	}
}

impl From<BTreeMap<Bytes, Value>> for Value {
	fn from(entries: BTreeMap<Bytes, Value>) -> Self {
		Value::Dict(entries)
	}
}
