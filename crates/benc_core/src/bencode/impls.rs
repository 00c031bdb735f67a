use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use bytes::Bytes;

use crate::bencode::{BencodeError, Decode, Decoder, Encode, Encoder, Result, Value};

macro_rules! integer_target {
	($($ty:ty),* $(,)?) => {$(
		impl Decode for $ty {
			fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
				*self = decoder.read_integer::<Self>()?.narrow::<Self>()?;
				Ok(())
			}
		}

		impl Encode for $ty {
			fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
				encoder.write_integer(self)
			}
		}
	)*};
}

integer_target!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decode for bool {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		let value = decoder.read_integer::<Self>()?;
		*self = match value.as_i128() {
			0 => false,
			1 => true,
			_ => return Err(BencodeError::type_mismatch::<Self>(format!("integer {value}"))),
		};
		Ok(())
	}
}

impl Encode for bool {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.write_integer(u8::from(*self))
	}
}

impl Decode for String {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		let bytes = decoder.read_bytes::<Self>()?;
		*self = String::from_utf8(bytes).map_err(|_| BencodeError::type_mismatch::<Self>("non-utf8 string"))?;
		Ok(())
	}
}

impl Encode for String {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.write_bytes(self.as_bytes())
	}
}

impl Encode for str {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.write_bytes(self.as_bytes())
	}
}

impl Decode for Bytes {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		*self = Bytes::from(decoder.read_bytes::<Self>()?);
		Ok(())
	}
}

impl Encode for Bytes {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.write_bytes(self)
	}
}

impl Decode for Value {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		*self = decoder.decode_value()?;
		Ok(())
	}
}

impl Encode for Value {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.encode_value(self)
	}
}

impl<T: Encode + ?Sized> Encode for &T {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		(**self).encode(encoder)
	}
}

impl<T: Decode + ?Sized> Decode for Box<T> {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		(**self).decode(decoder)
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		(**self).encode(encoder)
	}
}

impl<T: Decode + Default> Decode for Option<T> {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		self.get_or_insert_with(T::default).decode(decoder)
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		match self {
			Some(value) => value.encode(encoder),
			None => Err(BencodeError::EmptySlot {
				target: std::any::type_name::<Self>(),
			}),
		}
	}
}

/// Existing elements are decoded in place; the vector ends with exactly as many elements as the list.
impl<T: Decode + Default> Decode for Vec<T> {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		let count = decoder.read_list::<Self, _>(|decoder, index| {
			if index == self.len() {
				self.push(T::default());
			}
			self[index].decode(decoder)
		})?;
		self.truncate(count);
		Ok(())
	}
}

impl<T: Encode> Encode for Vec<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		self.as_slice().encode(encoder)
	}
}

impl<T: Encode> Encode for [T] {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.write_list(|encoder| {
			for item in self {
				item.encode(encoder)?;
			}
			Ok(())
		})
	}
}

impl<T: Decode, const N: usize> Decode for [T; N] {
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		let count = decoder.read_list::<Self, _>(|decoder, index| match self.get_mut(index) {
			Some(slot) => slot.decode(decoder),
			None => Err(BencodeError::type_mismatch::<Self>(format!("list longer than {N}"))),
		})?;
		if count != N {
			return Err(BencodeError::type_mismatch::<Self>(format!("list of {count}")));
		}
		Ok(())
	}
}

impl<T: Encode, const N: usize> Encode for [T; N] {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		self.as_slice().encode(encoder)
	}
}

/// Dictionary key type for typed mapping targets.
pub trait MapKey: Sized {
	/// Build a key from raw dictionary key bytes.
	fn from_key(raw: Vec<u8>) -> Result<Self>;

	/// Raw bytes written for this key.
	fn as_key(&self) -> &[u8];
}

impl MapKey for String {
	fn from_key(raw: Vec<u8>) -> Result<Self> {
		String::from_utf8(raw).map_err(|_| BencodeError::type_mismatch::<Self>("non-utf8 dict key"))
	}

	fn as_key(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl MapKey for Bytes {
	fn from_key(raw: Vec<u8>) -> Result<Self> {
		Ok(Bytes::from(raw))
	}

	fn as_key(&self) -> &[u8] {
		self
	}
}

/// Decoded pairs are inserted into the existing map.
impl<K, V> Decode for BTreeMap<K, V>
where
	K: MapKey + Ord,
	V: Decode + Default,
{
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		decoder.read_dict::<Self, _>(|decoder, raw| {
			let key = K::from_key(raw)?;
			let mut value = V::default();
			value.decode(decoder)?;
			self.insert(key, value);
			Ok(())
		})
	}
}

impl<K: MapKey, V: Encode> Encode for BTreeMap<K, V> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encode_sorted(self.iter(), encoder)
	}
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash,
	V: Decode + Default,
	S: BuildHasher,
{
	fn decode(&mut self, decoder: &mut Decoder<'_>) -> Result<()> {
		decoder.read_dict::<Self, _>(|decoder, raw| {
			let key = K::from_key(raw)?;
			let mut value = V::default();
			value.decode(decoder)?;
			self.insert(key, value);
			Ok(())
		})
	}
}

impl<K: MapKey, V: Encode, S> Encode for HashMap<K, V, S> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encode_sorted(self.iter(), encoder)
	}
}

fn encode_sorted<'v, K, V, I>(entries: I, encoder: &mut Encoder<'_>) -> Result<()>
where
	K: MapKey + 'v,
	V: Encode + 'v,
	I: Iterator<Item = (&'v K, &'v V)>,
{
	let mut entries: Vec<_> = entries.map(|(key, value)| (key.as_key(), value)).collect();
	entries.sort_by(|left, right| left.0.cmp(right.0));
	encoder.write_dict(|encoder| {
		for (key, value) in entries {
			encoder.write_pair(key, value)?;
		}
		Ok(())
	})
}
