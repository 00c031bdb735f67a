use crate::bencode::{Decode, Decoder, Encode, Encoder, Result};

/// Static declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
	/// Declared Rust field name.
	pub name: &'static str,
	/// Explicit dictionary key override.
	pub tag: Option<&'static str>,
}

impl FieldDecl {
	/// Dictionary key for this field, or `None` when the field is excluded.
	///
	/// An explicit tag wins over the field name; a tag of `""` or `"-"` excludes the field.
	pub fn key(&self) -> Option<&'static str> {
		match self.tag {
			None => Some(self.name),
			Some("" | "-") => None,
			Some(tag) => Some(tag),
		}
	}
}

/// A struct whose fields map to dictionary keys.
///
/// Usually implemented through [`bencode_record!`](crate::bencode_record).
pub trait Record {
	/// Field declarations in declaration order.
	const FIELDS: &'static [FieldDecl];

	/// Mutable access to the field declared as `name`.
	fn field_mut(&mut self, name: &str) -> Option<&mut dyn Decode>;

	/// Shared access to the field declared as `name`.
	fn field(&self, name: &str) -> Option<&dyn Encode>;
}

/// Ordered `(key, field name)` pairs resolved for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
	entries: Vec<(&'static str, &'static str)>,
}

impl FieldMap {
	/// Resolve keys for `fields`, dropping excluded fields and keeping declaration order.
	pub fn resolve(fields: &'static [FieldDecl]) -> Self {
		let entries = fields.iter().filter_map(|field| field.key().map(|key| (key, field.name))).collect();
		Self { entries }
	}

	/// Field name mapped to `key`. When two fields share a key the later declaration wins.
	pub fn lookup(&self, key: &[u8]) -> Option<&'static str> {
		self.entries.iter().rev().find(|(candidate, _)| candidate.as_bytes() == key).map(|(_, name)| *name)
	}

	/// Iterate `(key, field name)` pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
		self.entries.iter().copied()
	}

	/// Number of mapped fields.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no field is mapped.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Populate a record from a dictionary.
///
/// Keys without a mapped field are decoded dynamically and discarded.
pub fn decode_record<R: Record>(record: &mut R, decoder: &mut Decoder<'_>) -> Result<()> {
	let map = FieldMap::resolve(R::FIELDS);
	decoder.read_dict::<R, _>(|decoder, key| match map.lookup(&key).and_then(|name| record.field_mut(name)) {
		Some(field) => field.decode(decoder),
		None => decoder.skip_value(),
	})
}

/// Emit a record as a dictionary in field declaration order.
pub fn encode_record<R: Record>(record: &R, encoder: &mut Encoder<'_>) -> Result<()> {
	let map = FieldMap::resolve(R::FIELDS);
	encoder.write_dict(|encoder| {
		for (key, name) in map.iter() {
			if let Some(field) = record.field(name) {
				encoder.write_pair(key.as_bytes(), field)?;
			}
		}
		Ok(())
	})
}

/// Signedness and bit width of an integer target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntWidth {
	/// Whether negative values are representable.
	pub signed: bool,
	/// Storage width in bits.
	pub bits: u32,
}

impl IntWidth {
	/// Smallest representable value.
	pub fn min(self) -> i128 {
		if self.signed { -(1_i128 << (self.bits - 1)) } else { 0 }
	}

	/// Largest representable value.
	pub fn max(self) -> i128 {
		if self.signed {
			(1_i128 << (self.bits - 1)) - 1
		} else {
			(1_i128 << self.bits) - 1
		}
	}

	/// Whether `value` fits this width.
	pub fn contains(self, value: i128) -> bool {
		(self.min()..=self.max()).contains(&value)
	}
}

/// Fixed-width integer usable as a typed decode target.
pub trait BoundedInt: Copy {
	/// Range of the type.
	const WIDTH: IntWidth;

	/// Convert a value already checked against [`Self::WIDTH`].
	fn from_wide(value: i128) -> Self;
}

macro_rules! bounded_int {
	($($ty:ty => $signed:literal),* $(,)?) => {$(
		impl BoundedInt for $ty {
			const WIDTH: IntWidth = IntWidth {
				signed: $signed,
				bits: <$ty>::BITS,
			};

			fn from_wide(value: i128) -> Self {
				value as $ty
			}
		}
	)*};
}

bounded_int! {
	i8 => true,
	i16 => true,
	i32 => true,
	i64 => true,
	isize => true,
	u8 => false,
	u16 => false,
	u32 => false,
	u64 => false,
	usize => false,
}

/// Register a struct as a bencode record and implement [`Decode`] and [`Encode`] for it.
///
/// Each listed field maps to a dictionary key equal to its name, or to the
/// string after `=>` when given. A key of `"-"` or `""` excludes the field in
/// both directions. Unlisted fields are never touched.
///
/// ```
/// use benc::bencode::{from_bytes_into, to_bytes};
///
/// #[derive(Debug, Default)]
/// struct Piece {
/// 	index: u32,
/// 	length: u64,
/// 	cached: bool,
/// }
///
/// benc::bencode_record!(Piece {
/// 	index,
/// 	length => "piece length",
/// 	cached => "-",
/// });
///
/// let mut piece = Piece::default();
/// from_bytes_into(b"d5:indexi3e12:piece lengthi16384ee", &mut piece).unwrap();
/// assert_eq!((piece.index, piece.length), (3, 16384));
/// assert_eq!(to_bytes(&piece).unwrap(), b"d5:indexi3e12:piece lengthi16384ee");
/// ```
#[macro_export]
macro_rules! bencode_record {
	(@tag) => {
		::core::option::Option::None
	};
	(@tag $tag:literal) => {
		::core::option::Option::Some($tag)
	};
	($name:ident { $($field:ident $(=> $tag:literal)?),* $(,)? }) => {
		impl $crate::bencode::Record for $name {
			const FIELDS: &'static [$crate::bencode::FieldDecl] = &[$(
				$crate::bencode::FieldDecl {
					name: ::core::stringify!($field),
					tag: $crate::bencode_record!(@tag $($tag)?),
				}
			),*];

			fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn $crate::bencode::Decode> {
				$(
					if name == ::core::stringify!($field) {
						return ::core::option::Option::Some(&mut self.$field);
					}
				)*
				::core::option::Option::None
			}

			fn field(&self, name: &str) -> ::core::option::Option<&dyn $crate::bencode::Encode> {
				$(
					if name == ::core::stringify!($field) {
						return ::core::option::Option::Some(&self.$field);
					}
				)*
				::core::option::Option::None
			}
		}

		impl $crate::bencode::Decode for $name {
			fn decode(&mut self, decoder: &mut $crate::bencode::Decoder<'_>) -> $crate::bencode::Result<()> {
				$crate::bencode::decode_record(self, decoder)
			}
		}

		impl $crate::bencode::Encode for $name {
			fn encode(&self, encoder: &mut $crate::bencode::Encoder<'_>) -> $crate::bencode::Result<()> {
				$crate::bencode::encode_record(self, encoder)
			}
		}
	};
}
