#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::io::Cursor;

use benc::bencode::{Value, decode, decode_into, from_bytes, from_bytes_into, to_bytes};
use benc_testkit::read_fixture;
use bytes::Bytes;

#[derive(Debug, Default)]
struct Torrent {
	announce: String,
	info: TorrentInfo,
}

benc::bencode_record!(Torrent { announce, info });

#[derive(Debug, Default)]
struct TorrentInfo {
	name: String,
	piece_length: u32,
	pieces: Bytes,
	files: Vec<TorrentFile>,
}

benc::bencode_record!(TorrentInfo {
	name,
	piece_length => "piece length",
	pieces,
	files,
});

#[derive(Debug, Default, PartialEq)]
struct TorrentFile {
	length: u64,
	path: Vec<String>,
}

benc::bencode_record!(TorrentFile { length, path });

#[test]
fn sample_torrent_dynamic_decode() {
	let data = read_fixture("sample.torrent");
	let value = from_bytes(&data).expect("fixture decodes");

	assert_eq!(value.get(b"announce").and_then(Value::as_str), Some("http://tracker.example.com/announce"));
	assert_eq!(value.get(b"comment").and_then(Value::as_str), Some("test fixture"));

	let info = value.get(b"info").expect("info dict");
	assert_eq!(info.get(b"piece length").and_then(Value::as_integer), Some(2048));
	let pieces = info.get(b"pieces").and_then(Value::as_bytes).expect("pieces");
	assert_eq!(pieces.len(), 40);
	assert!(info.get(b"pieces").and_then(Value::as_str).is_none(), "pieces are not utf-8");

	let files = info.get(b"files").and_then(Value::as_list).expect("files list");
	assert_eq!(files.len(), 2);
}

#[test]
fn sample_torrent_re_encodes_byte_for_byte() {
	let data = read_fixture("sample.torrent");
	let value = from_bytes(&data).expect("fixture decodes");
	assert_eq!(to_bytes(&value).expect("encode"), data);
}

#[test]
fn sample_torrent_typed_decode_skips_unknown_keys() {
	let data = read_fixture("sample.torrent");
	let mut torrent = Torrent::default();
	from_bytes_into(&data, &mut torrent).expect("typed decode");

	assert_eq!(torrent.announce, "http://tracker.example.com/announce");
	assert_eq!(torrent.info.name, "sample");
	assert_eq!(torrent.info.piece_length, 2048);
	assert_eq!(torrent.info.pieces.len(), 40);
	assert_eq!(
		torrent.info.files,
		[
			TorrentFile {
				length: 1024,
				path: vec!["alpha".to_owned(), "first.bin".to_owned()],
			},
			TorrentFile {
				length: 2048,
				path: vec!["beta".to_owned(), "second.bin".to_owned()],
			},
		]
	);
}

#[test]
fn info_map_holds_dynamic_values() {
	let data = read_fixture("sample.torrent");

	#[derive(Default)]
	struct Loose {
		info: BTreeMap<String, Value>,
	}
	benc::bencode_record!(Loose { info });

	let mut loose = Loose::default();
	from_bytes_into(&data, &mut loose).expect("typed decode");
	assert_eq!(loose.info.keys().map(String::as_str).collect::<Vec<_>>(), ["files", "name", "piece length", "pieces"]);
	assert_eq!(loose.info["name"], Value::string("sample"));
}

#[test]
fn stream_decode_reads_one_value_at_a_time() {
	let data = read_fixture("sample.torrent");
	let mut stream = data.clone();
	stream.extend_from_slice(&data);
	let mut cursor = Cursor::new(stream);

	let first = decode(&mut cursor).expect("first value");
	assert_eq!(cursor.position(), data.len() as u64);

	let mut second = Torrent::default();
	decode_into(&mut cursor, &mut second).expect("second value");
	assert_eq!(cursor.position(), 2 * data.len() as u64);
	assert_eq!(first.get(b"info").and_then(|info| info.get(b"name")), Some(&Value::string("sample")));
	assert_eq!(second.info.name, "sample");
}
