use std::collections::BTreeMap;

use benc::bencode::{Value, from_bytes_into, to_bytes};
use bytes::Bytes;

use crate::error::{CliError, Result};

/// Top-level torrent metainfo with the `info` dictionary kept dynamic.
#[derive(Debug, Default)]
pub struct Metadata {
	/// Tracker URL.
	pub announce: String,
	/// Raw `info` dictionary, `None` when the key is absent.
	pub info: Option<BTreeMap<String, Value>>,
}

benc::bencode_record!(Metadata { announce, info });

/// Typed view of the `info` dictionary.
#[derive(Debug, Default, PartialEq)]
pub struct Info {
	/// Bytes per piece.
	pub piece_length: u64,
	/// Concatenated 20-byte piece hashes.
	pub pieces: Bytes,
	/// Suggested file or directory name.
	pub name: String,
	/// Length of the single file, zero in multi-file mode.
	pub length: u64,
	/// Files in multi-file mode.
	pub files: Vec<File>,
}

benc::bencode_record!(Info {
	piece_length => "piece length",
	pieces,
	name,
	length,
	files,
});

/// One entry of a multi-file torrent.
#[derive(Debug, Default, PartialEq)]
pub struct File {
	/// File size in bytes.
	pub length: u64,
	/// Path components below the torrent directory.
	pub path: Vec<String>,
}

benc::bencode_record!(File { length, path });

const PIECE_HASH_LEN: usize = 20;

impl Info {
	/// Decode the typed view from the dynamic `info` map of `metadata`.
	pub fn from_metadata(metadata: &Metadata) -> Result<Self> {
		let Some(info) = &metadata.info else {
			return Err(CliError::MissingKey { key: "info" });
		};
		let raw = to_bytes(info)?;
		let mut info = Self::default();
		from_bytes_into(&raw, &mut info)?;
		Ok(info)
	}

	/// Total payload size across all files.
	pub fn total_length(&self) -> u64 {
		if self.files.is_empty() {
			self.length
		} else {
			self.files.iter().map(|file| file.length).sum()
		}
	}

	/// Number of piece hashes.
	pub fn piece_count(&self) -> usize {
		self.pieces.len() / PIECE_HASH_LEN
	}
}

#[cfg(test)]
mod tests;
