use std::path::PathBuf;

use benc::bencode::{from_bytes_into, to_bytes};

use crate::cmd::util::{emit_json, truncate};
use crate::error::Result;
use crate::input;
use crate::metainfo::{Info, Metadata};

#[derive(clap::Args)]
pub struct Args {
	/// Torrent file; standard input when omitted.
	pub path: Option<PathBuf>,
	/// Write the re-encoded metadata here instead of discarding it.
	#[arg(long)]
	pub out: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Decode torrent metainfo into typed records, re-encode it, and print a summary.
pub fn run(args: Args) -> Result<()> {
	let Args { path, out, json } = args;

	let input = input::load(path.as_deref())?;
	let mut metadata = Metadata::default();
	from_bytes_into(&input.bytes, &mut metadata)?;
	let info = Info::from_metadata(&metadata)?;

	// `--out` is only created once encoding has succeeded.
	let encoded = to_bytes(&metadata)?;
	if let Some(out) = &out {
		std::fs::write(out, &encoded)?;
	}

	let summary = MetaJson {
		path: input.origin,
		compression: input.compression.as_str(),
		announce: metadata.announce,
		name: info.name.clone(),
		piece_length: info.piece_length,
		piece_count: info.piece_count(),
		file_count: info.files.len().max(1),
		total_length: info.total_length(),
		bytes_in: input.raw_len,
		bytes_encoded: encoded.len() as u64,
		out: out.map(|path| path.display().to_string()),
	};

	if json {
		return emit_json(&summary);
	}

	println!("path: {}", summary.path);
	println!("compression: {}", summary.compression);
	println!("announce: {}", truncate(&summary.announce, 120));
	println!("name: {}", truncate(&summary.name, 120));
	println!("piece_length: {}", summary.piece_length);
	println!("piece_count: {}", summary.piece_count);
	println!("file_count: {}", summary.file_count);
	println!("total_length: {}", summary.total_length);
	println!("bytes_in: {}", summary.bytes_in);
	println!("bytes_encoded: {}", summary.bytes_encoded);
	if let Some(out) = &summary.out {
		println!("out: {out}");
	}
	for file in info.files.iter().take(16) {
		println!("  {} ({} bytes)", file.path.join("/"), file.length);
	}
	if info.files.len() > 16 {
		println!("  ... {} more files", info.files.len() - 16);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct MetaJson {
	path: String,
	compression: &'static str,
	announce: String,
	name: String,
	piece_length: u64,
	piece_count: usize,
	file_count: usize,
	total_length: u64,
	bytes_in: usize,
	bytes_encoded: u64,
	out: Option<String>,
}
