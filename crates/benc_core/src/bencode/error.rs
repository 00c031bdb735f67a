use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, BencodeError>;

/// Coarse classification of [`BencodeError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Grammar violation, truncated stream, or non-string dict key.
	Malformed,
	/// Decoded shape or magnitude does not fit the typed target.
	TypeMismatch,
	/// Value handed to the encoder has no bencode representation.
	InvalidArgument,
	/// Underlying byte source or sink failed.
	Io,
}

/// Errors produced while decoding or encoding bencode data.
#[derive(Debug, Error)]
pub enum BencodeError {
	/// Byte source or sink IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Stream ended in the middle of a value.
	#[error("unexpected eof at offset {at}")]
	UnexpectedEof {
		/// Offset of the read that hit end of stream.
		at: u64,
	},
	/// Byte that cannot appear at this point of the grammar.
	#[error("unexpected byte {byte:?} at offset {at} while reading {context}")]
	UnexpectedByte {
		/// Offending byte.
		byte: char,
		/// Offset of the offending byte.
		at: u64,
		/// Production being read.
		context: &'static str,
	},
	/// Integer body is not a valid 64-bit magnitude.
	#[error("invalid integer at offset {at}: {reason}")]
	InvalidInteger {
		/// Offset of the integer body.
		at: u64,
		/// Short description of the defect.
		reason: &'static str,
	},
	/// Byte string length prefix does not fit 64 bits.
	#[error("invalid byte string length at offset {at}")]
	InvalidLength {
		/// Offset of the length prefix.
		at: u64,
	},
	/// Dictionary key did not start a byte string.
	#[error("dict key at offset {at} is not a byte string")]
	NonStringKey {
		/// Offset of the key discriminator.
		at: u64,
	},
	/// List/dict nesting exceeded the configured limit.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Bytes remained after the top-level value of a slice.
	#[error("trailing data at offset {at}")]
	TrailingData {
		/// Offset of the first unconsumed byte.
		at: u64,
	},
	/// Decoded value is not appropriate for the typed target.
	#[error("value ({value}) is not appropriate for type {target}")]
	TypeMismatch {
		/// Description of the decoded value.
		value: String,
		/// Rust type name of the target.
		target: &'static str,
	},
	/// Empty optional or absent value handed to the encoder.
	#[error("cannot encode empty {target}")]
	EmptySlot {
		/// Rust type name of the empty slot.
		target: &'static str,
	},
}

impl BencodeError {
	/// Build a type mismatch error for target type `T`.
	pub fn type_mismatch<T: ?Sized>(value: impl Into<String>) -> Self {
		Self::TypeMismatch {
			value: value.into(),
			target: std::any::type_name::<T>(),
		}
	}

	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::UnexpectedEof { .. }
			| Self::UnexpectedByte { .. }
			| Self::InvalidInteger { .. }
			| Self::InvalidLength { .. }
			| Self::NonStringKey { .. }
			| Self::DepthExceeded { .. }
			| Self::TrailingData { .. } => ErrorKind::Malformed,
			Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
			Self::EmptySlot { .. } => ErrorKind::InvalidArgument,
		}
	}
}
