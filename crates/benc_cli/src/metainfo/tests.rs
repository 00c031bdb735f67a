use std::collections::BTreeMap;

use benc::bencode::{from_bytes_into, to_bytes};
use bytes::Bytes;

use super::{File, Info, Metadata};
use crate::error::CliError;

const SINGLE: &[u8] = b"d8:announce15:http://test.com4:infod6:lengthi5e4:name4:test12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";

#[test]
fn single_file_metadata_decodes() {
	let mut metadata = Metadata::default();
	from_bytes_into(SINGLE, &mut metadata).expect("metadata");
	assert_eq!(metadata.announce, "http://test.com");
	assert_eq!(metadata.info.as_ref().map(BTreeMap::len), Some(4));

	let info = Info::from_metadata(&metadata).expect("info");
	assert_eq!(info.name, "test");
	assert_eq!(info.piece_length, 16384);
	assert_eq!(info.piece_count(), 1);
	assert_eq!(info.total_length(), 5);
	assert!(info.files.is_empty());
}

#[test]
fn metadata_re_encodes_known_keys_only() {
	let input = b"d8:announce1:a7:comment2:hi4:infod4:name1:nee";
	let mut metadata = Metadata::default();
	from_bytes_into(input, &mut metadata).expect("metadata");
	assert_eq!(to_bytes(&metadata).expect("encode"), b"d8:announce1:a4:infod4:name1:nee");
}

#[test]
fn total_length_sums_files() {
	let info = Info {
		files: vec![
			File {
				length: 3,
				path: vec!["a".to_owned()],
			},
			File {
				length: 4,
				path: vec!["b".to_owned(), "c".to_owned()],
			},
		],
		pieces: Bytes::from(vec![0_u8; 45]),
		..Info::default()
	};
	assert_eq!(info.total_length(), 7);
	assert_eq!(info.piece_count(), 2);
}

#[test]
fn missing_info_is_reported() {
	let mut metadata = Metadata::default();
	from_bytes_into(b"d8:announce1:ae", &mut metadata).expect("metadata");
	let err = Info::from_metadata(&metadata).expect_err("no info");
	assert!(matches!(err, CliError::MissingKey { key: "info" }));
}

#[test]
fn empty_info_is_present_but_blank() {
	let mut metadata = Metadata::default();
	from_bytes_into(b"d8:announce1:a4:infodee", &mut metadata).expect("metadata");
	assert_eq!(metadata.info.as_ref().map(BTreeMap::is_empty), Some(true));

	let info = Info::from_metadata(&metadata).expect("empty info decodes");
	assert_eq!(info, Info::default());
	assert_eq!(info.total_length(), 0);
	assert_eq!(to_bytes(&metadata).expect("encode"), b"d8:announce1:a4:infodee");
}

#[test]
fn mistyped_info_field_is_a_codec_error() {
	let mut metadata = Metadata::default();
	from_bytes_into(b"d4:infod6:lengthi-1eee", &mut metadata).expect("metadata");
	let err = Info::from_metadata(&metadata).expect_err("negative length");
	assert!(matches!(err, CliError::Bencode(_)));
}
