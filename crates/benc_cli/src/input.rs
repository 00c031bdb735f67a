use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{CliError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw bencode bytes.
	None,
	/// zstd-compressed bencode bytes.
	Zstd,
}

impl Compression {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Raw input bytes after transparent decompression.
#[derive(Debug)]
pub struct Input {
	/// Human-readable origin (`<stdin>` or the path).
	pub origin: String,
	/// Compression detected on the raw bytes.
	pub compression: Compression,
	/// Size of the input as read, before decompression.
	pub raw_len: usize,
	/// Decoded bencode bytes.
	pub bytes: Vec<u8>,
}

/// Read `path`, or standard input when `None`, and undo zstd compression.
pub fn load(path: Option<&Path>) -> Result<Input> {
	let (origin, raw) = match path {
		Some(path) => (path.display().to_string(), std::fs::read(path)?),
		None => {
			let mut raw = Vec::new();
			std::io::stdin().lock().read_to_end(&mut raw)?;
			("<stdin>".to_owned(), raw)
		}
	};

	let raw_len = raw.len();
	let (compression, bytes) = decode_bytes(raw, MAX_DECOMPRESSED_BYTES)?;
	debug!(origin = %origin, compression = compression.as_str(), raw_len, len = bytes.len(), "loaded input");
	Ok(Input {
		origin,
		compression,
		raw_len,
		bytes,
	})
}

/// Detect compression, returning `(mode, decoded_bytes)`.
pub fn decode_bytes(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	if raw.starts_with(&ZSTD_MAGIC) {
		let out = decode_zstd(&raw, limit)?;
		return Ok((Compression::Zstd, out));
	}
	Ok((Compression::None, raw))
}

fn decode_zstd(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(CliError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
