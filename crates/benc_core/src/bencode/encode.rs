use std::fmt::Display;
use std::io::Write;

use tracing::debug;

use crate::bencode::{BencodeError, Result, Value};

/// A host value that can be serialized as bencode.
pub trait Encode {
	/// Write `self` as exactly one bencode value.
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;
}

/// Recursive bencode encoder over a byte sink.
///
/// Every write is fail-fast: the first sink error aborts the whole operation.
pub struct Encoder<'a> {
	writer: &'a mut dyn Write,
	written: u64,
}

impl<'a> Encoder<'a> {
	/// Create an encoder writing to `writer`.
	pub fn new(writer: &'a mut dyn Write) -> Self {
		Self { writer, written: 0 }
	}

	/// Number of bytes written so far.
	pub fn written(&self) -> u64 {
		self.written
	}

	/// Encode a typed value.
	pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
		value.encode(self)
	}

	/// Write an `integer` production.
	pub fn write_integer<T: Display>(&mut self, value: T) -> Result<()> {
		self.raw(format!("i{value}e").as_bytes())
	}

	/// Write a `byte-string` production.
	pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
		self.raw(format!("{}:", bytes.len()).as_bytes())?;
		self.raw(bytes)
	}

	/// Write a `list` production whose elements are emitted by `body`.
	pub fn write_list<F>(&mut self, body: F) -> Result<()>
	where
		F: FnOnce(&mut Self) -> Result<()>,
	{
		self.raw(b"l")?;
		body(self)?;
		self.raw(b"e")
	}

	/// Write a `dict` production whose pairs are emitted by `body`, usually via [`Encoder::write_pair`].
	pub fn write_dict<F>(&mut self, body: F) -> Result<()>
	where
		F: FnOnce(&mut Self) -> Result<()>,
	{
		self.raw(b"d")?;
		body(self)?;
		self.raw(b"e")
	}

	/// Write one dictionary pair.
	pub fn write_pair<T: Encode + ?Sized>(&mut self, key: &[u8], value: &T) -> Result<()> {
		self.write_bytes(key)?;
		value.encode(self)
	}

	/// Encode a dynamic value tree.
	pub fn encode_value(&mut self, value: &Value) -> Result<()> {
		match value {
			Value::Absent => Err(BencodeError::EmptySlot { target: "Value" }),
			Value::Integer(value) => self.write_integer(value),
			Value::Bytes(bytes) => self.write_bytes(bytes),
			Value::List(items) => self.write_list(|encoder| {
				for item in items {
					encoder.encode_value(item)?;
				}
				Ok(())
			}),
			Value::Dict(entries) => self.write_dict(|encoder| {
				for (key, value) in entries {
					encoder.write_bytes(key)?;
					encoder.encode_value(value)?;
				}
				Ok(())
			}),
		}
	}

	fn raw(&mut self, bytes: &[u8]) -> Result<()> {
		self.writer.write_all(bytes)?;
		self.written += bytes.len() as u64;
		Ok(())
	}
}

/// Encode `value` to `writer`, flushing before returning.
///
/// The value is encoded in memory first; when encoding fails nothing reaches `writer`.
pub fn encode<W: Write, T: Encode + ?Sized>(mut writer: W, value: &T) -> Result<()> {
	let out = to_bytes(value)?;
	writer.write_all(&out)?;
	writer.flush()?;
	debug!(bytes = out.len(), source = std::any::type_name::<T>(), "encoded value");
	Ok(())
}

/// Encode `value` into a fresh byte vector.
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	Encoder::new(&mut out).encode(value)?;
	Ok(out)
}
