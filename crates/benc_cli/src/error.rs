use thiserror::Error;

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `benc` commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Codec failure while decoding or encoding input.
	#[error(transparent)]
	Bencode(#[from] benc::bencode::BencodeError),
	/// Underlying I/O failure while reading input or writing output.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// JSON rendering failure.
	#[error("JSON output error: {0}")]
	Json(#[from] serde_json::Error),
	/// zstd output exceeded the configured safety limit.
	#[error("decompressed input exceeds limit ({limit} bytes)")]
	DecompressedTooLarge {
		/// Maximum decompressed bytes allowed.
		limit: usize,
	},
	/// A required dictionary entry was missing from the input.
	#[error("missing {key:?} entry in metainfo")]
	MissingKey {
		/// Key that was expected.
		key: &'static str,
	},
}
