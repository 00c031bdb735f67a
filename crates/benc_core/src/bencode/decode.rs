use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;

use bytes::Bytes;
use tracing::debug;

use crate::bencode::resolve::BoundedInt;
use crate::bencode::source::ByteSource;
use crate::bencode::{BencodeError, Result, Value};

/// Runtime limits for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum list/dict nesting depth.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 64 }
	}
}

/// A host value that can be populated from a bencode stream.
///
/// Implementations read exactly one value through the [`Decoder`] building blocks.
pub trait Decode {
	/// Populate `self` from the next value of `decoder`.
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()>;
}

/// Value shape selected by a discriminator byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
	/// `i...e`
	Integer,
	/// `<len>:<bytes>`
	Bytes,
	/// `l...e`
	List,
	/// `d...e`
	Dict,
}

impl Token {
	/// Stable lowercase label used in diagnostics.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Integer => "integer",
			Self::Bytes => "string",
			Self::List => "list",
			Self::Dict => "dict",
		}
	}
}

/// Decoded integer before narrowing to a target width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer {
	/// Whether a `-` sign preceded the digits.
	pub negative: bool,
	/// Absolute value of the digits.
	pub magnitude: u64,
}

impl Integer {
	/// Signed value widened to `i128`.
	pub fn as_i128(self) -> i128 {
		let magnitude = i128::from(self.magnitude);
		if self.negative { -magnitude } else { magnitude }
	}

	/// Value as `i64`, if it fits.
	pub fn to_i64(self) -> Option<i64> {
		i64::try_from(self.as_i128()).ok()
	}

	/// Narrow to a fixed-width integer target, failing when out of range.
	pub fn narrow<T: BoundedInt>(self) -> Result<T> {
		let value = self.as_i128();
		if !T::WIDTH.contains(value) {
			return Err(BencodeError::type_mismatch::<T>(format!("integer {self}")));
		}
		Ok(T::from_wide(value))
	}
}

impl fmt::Display for Integer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_i128())
	}
}

/// Recursive single-pass bencode decoder over a buffered byte stream.
pub struct Decoder<'a> {
	source: ByteSource<'a>,
	options: DecodeOptions,
	depth: u32,
}

impl<'a> Decoder<'a> {
	/// Create a decoder with default options.
	pub fn new(reader: &'a mut dyn BufRead) -> Self {
		Self::with_options(reader, DecodeOptions::default())
	}

	/// Create a decoder with explicit options.
	pub fn with_options(reader: &'a mut dyn BufRead, options: DecodeOptions) -> Self {
		Self {
			source: ByteSource::new(reader),
			options,
			depth: 0,
		}
	}

	/// Number of bytes consumed so far.
	pub fn position(&self) -> u64 {
		self.source.pos()
	}

	/// Read the next discriminator byte.
	///
	/// A leading digit is pushed back so the byte string length can be parsed whole.
	pub fn next_token(&mut self) -> Result<Token> {
		let at = self.source.pos();
		match self.source.read_byte()? {
			b'i' => Ok(Token::Integer),
			b'l' => Ok(Token::List),
			b'd' => Ok(Token::Dict),
			b'0'..=b'9' => {
				self.source.unread_byte();
				Ok(Token::Bytes)
			}
			byte => Err(BencodeError::UnexpectedByte {
				byte: char::from(byte),
				at,
				context: "value",
			}),
		}
	}

	/// Decode the next value into a typed target.
	pub fn decode_into<T: Decode + ?Sized>(&mut self, target: &mut T) -> Result<()> {
		target.decode(self)
	}

	/// Decode the next value as a dynamic tree.
	pub fn decode_value(&mut self) -> Result<Value> {
		match self.next_token()? {
			Token::Integer => {
				let at = self.source.pos();
				let integer = self.integer_body()?;
				let value = integer.to_i64().ok_or(BencodeError::InvalidInteger {
					at,
					reason: "value does not fit i64",
				})?;
				Ok(Value::Integer(value))
			}
			Token::Bytes => Ok(Value::Bytes(Bytes::from(self.bytes_body()?))),
			Token::List => {
				self.enter()?;
				let mut items = Vec::new();
				while !self.source.next_is(b'e')? {
					items.push(self.decode_value()?);
				}
				self.leave();
				Ok(Value::List(items))
			}
			Token::Dict => {
				self.enter()?;
				let mut entries = BTreeMap::new();
				while !self.source.next_is(b'e')? {
					let key = self.dict_key()?;
					let value = self.decode_value()?;
					entries.insert(Bytes::from(key), value);
				}
				self.leave();
				Ok(Value::Dict(entries))
			}
		}
	}

	/// Consume and discard the next value.
	pub fn skip_value(&mut self) -> Result<()> {
		self.decode_value().map(drop)
	}

	/// Read an integer on behalf of target type `T`.
	pub fn read_integer<T: ?Sized>(&mut self) -> Result<Integer> {
		self.expect_token::<T>(Token::Integer)?;
		self.integer_body()
	}

	/// Read a byte string on behalf of target type `T`.
	pub fn read_bytes<T: ?Sized>(&mut self) -> Result<Vec<u8>> {
		self.expect_token::<T>(Token::Bytes)?;
		self.bytes_body()
	}

	/// Read a list on behalf of target type `T`, calling `each` once per element with its index.
	///
	/// `each` must consume exactly one value from the decoder.
	pub fn read_list<T: ?Sized, F>(&mut self, mut each: F) -> Result<usize>
	where
		F: FnMut(&mut Self, usize) -> Result<()>,
	{
		self.expect_token::<T>(Token::List)?;
		self.enter()?;
		let mut count = 0;
		while !self.source.next_is(b'e')? {
			each(self, count)?;
			count += 1;
		}
		self.leave();
		Ok(count)
	}

	/// Read a dictionary on behalf of target type `T`, calling `each` once per key.
	///
	/// `each` must consume exactly one value (the one paired with the key).
	pub fn read_dict<T: ?Sized, F>(&mut self, mut each: F) -> Result<()>
	where
		F: FnMut(&mut Self, Vec<u8>) -> Result<()>,
	{
		self.expect_token::<T>(Token::Dict)?;
		self.enter()?;
		while !self.source.next_is(b'e')? {
			let key = self.dict_key()?;
			each(self, key)?;
		}
		self.leave();
		Ok(())
	}

	fn expect_token<T: ?Sized>(&mut self, expected: Token) -> Result<()> {
		let token = self.next_token()?;
		if token != expected {
			return Err(BencodeError::type_mismatch::<T>(token.as_str()));
		}
		Ok(())
	}

	fn integer_body(&mut self) -> Result<Integer> {
		let start = self.source.pos();
		let negative = self.source.next_is(b'-')?;
		let mut magnitude = 0_u64;
		let mut digits = 0_usize;

		loop {
			let at = self.source.pos();
			match self.source.read_byte()? {
				b'e' => break,
				byte @ b'0'..=b'9' => {
					magnitude = magnitude
						.checked_mul(10)
						.and_then(|value| value.checked_add(u64::from(byte - b'0')))
						.ok_or(BencodeError::InvalidInteger {
							at: start,
							reason: "magnitude overflows 64 bits",
						})?;
					digits += 1;
				}
				byte => {
					return Err(BencodeError::UnexpectedByte {
						byte: char::from(byte),
						at,
						context: "integer",
					});
				}
			}
		}

		if negative && digits == 0 {
			return Err(BencodeError::InvalidInteger {
				at: start,
				reason: "sign without digits",
			});
		}
		Ok(Integer { negative, magnitude })
	}

	fn bytes_body(&mut self) -> Result<Vec<u8>> {
		let start = self.source.pos();
		let mut len = 0_u64;

		loop {
			let at = self.source.pos();
			match self.source.read_byte()? {
				b':' => break,
				byte @ b'0'..=b'9' => {
					len = len
						.checked_mul(10)
						.and_then(|value| value.checked_add(u64::from(byte - b'0')))
						.ok_or(BencodeError::InvalidLength { at: start })?;
				}
				byte => {
					return Err(BencodeError::UnexpectedByte {
						byte: char::from(byte),
						at,
						context: "string length",
					});
				}
			}
		}

		self.source.read_exact(len)
	}

	fn dict_key(&mut self) -> Result<Vec<u8>> {
		let at = self.source.pos();
		if !self.source.read_byte()?.is_ascii_digit() {
			return Err(BencodeError::NonStringKey { at });
		}
		self.source.unread_byte();
		self.bytes_body()
	}

	fn enter(&mut self) -> Result<()> {
		if self.depth >= self.options.max_depth {
			return Err(BencodeError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}
		self.depth += 1;
		Ok(())
	}

	fn leave(&mut self) {
		self.depth = self.depth.saturating_sub(1);
	}
}

/// Decode one dynamic value from a buffered reader.
///
/// Exactly the bytes of one value are consumed; the rest of the stream is left unread.
pub fn decode<R: BufRead>(reader: R) -> Result<Value> {
	decode_with_options(reader, &DecodeOptions::default())
}

/// Decode one dynamic value from a buffered reader with explicit options.
pub fn decode_with_options<R: BufRead>(mut reader: R, options: &DecodeOptions) -> Result<Value> {
	let mut decoder = Decoder::with_options(&mut reader, options.clone());
	let value = decoder.decode_value()?;
	debug!(bytes = decoder.position(), kind = value.kind(), "decoded dynamic value");
	Ok(value)
}

/// Decode one value from a buffered reader into `target`.
///
/// On error `target` may be left partially populated.
pub fn decode_into<R: BufRead, T: Decode + ?Sized>(mut reader: R, target: &mut T) -> Result<()> {
	let mut decoder = Decoder::new(&mut reader);
	decoder.decode_into(target)?;
	debug!(bytes = decoder.position(), target = std::any::type_name::<T>(), "decoded typed value");
	Ok(())
}

/// Decode a byte slice holding exactly one dynamic value.
pub fn from_bytes(data: &[u8]) -> Result<Value> {
	from_bytes_with_options(data, &DecodeOptions::default())
}

/// Decode a byte slice holding exactly one dynamic value with explicit options.
pub fn from_bytes_with_options(data: &[u8], options: &DecodeOptions) -> Result<Value> {
	let mut reader = data;
	let mut decoder = Decoder::with_options(&mut reader, options.clone());
	let value = decoder.decode_value()?;
	ensure_consumed(&decoder, data)?;
	Ok(value)
}

/// Decode a byte slice holding exactly one value into `target`.
pub fn from_bytes_into<T: Decode + ?Sized>(data: &[u8], target: &mut T) -> Result<()> {
	let mut reader = data;
	let mut decoder = Decoder::new(&mut reader);
	decoder.decode_into(target)?;
	ensure_consumed(&decoder, data)
}

fn ensure_consumed(decoder: &Decoder<'_>, data: &[u8]) -> Result<()> {
	let at = decoder.position();
	if at != data.len() as u64 {
		return Err(BencodeError::TrailingData { at });
	}
	Ok(())
}

#[cfg(test)]
mod tests;
