use std::collections::BTreeMap;
use std::io::BufRead;

use bytes::Bytes;

use crate::bencode::{BencodeError, DecodeOptions, Decoder, ErrorKind, Token, Value, decode, decode_with_options, from_bytes, from_bytes_with_options};

fn dict(entries: &[(&str, Value)]) -> Value {
	let entries: BTreeMap<Bytes, Value> = entries
		.iter()
		.map(|(key, value)| (Bytes::copy_from_slice(key.as_bytes()), value.clone()))
		.collect();
	Value::Dict(entries)
}

#[test]
fn decodes_integers() {
	assert_eq!(from_bytes(b"ie").expect("empty digits"), Value::Integer(0));
	assert_eq!(from_bytes(b"i0e").expect("zero"), Value::Integer(0));
	assert_eq!(from_bytes(b"i42e").expect("positive"), Value::Integer(42));
	assert_eq!(from_bytes(b"i-42e").expect("negative"), Value::Integer(-42));
	assert_eq!(from_bytes(b"i-9223372036854775808e").expect("i64 min"), Value::Integer(i64::MIN));
}

#[test]
fn accepts_non_canonical_integers() {
	assert_eq!(from_bytes(b"i03e").expect("leading zero"), Value::Integer(3));
	assert_eq!(from_bytes(b"i-0e").expect("negative zero"), Value::Integer(0));
}

#[test]
fn rejects_malformed_integers() {
	let err = from_bytes(b"i-e").expect_err("bare sign");
	assert!(matches!(err, BencodeError::InvalidInteger { at: 1, .. }));

	let err = from_bytes(b"i4x2e").expect_err("bad digit");
	assert!(matches!(err, BencodeError::UnexpectedByte { byte: 'x', at: 2, context: "integer" }));

	let err = from_bytes(b"i42").expect_err("missing terminator");
	assert!(matches!(err, BencodeError::UnexpectedEof { at: 3 }));

	let err = from_bytes(b"i9223372036854775808e").expect_err("exceeds i64");
	assert!(matches!(err, BencodeError::InvalidInteger { .. }));

	let err = from_bytes(b"i99999999999999999999e").expect_err("exceeds u64");
	assert!(matches!(err, BencodeError::InvalidInteger { .. }));
}

#[test]
fn decodes_byte_strings() {
	assert_eq!(from_bytes(b"0:").expect("empty"), Value::Bytes(Bytes::new()));
	assert_eq!(from_bytes(b"3:Foo").expect("text"), Value::string("Foo"));
	assert_eq!(
		from_bytes(b"2:\xff\x00").expect("raw bytes"),
		Value::Bytes(Bytes::from_static(&[0xff, 0x00]))
	);
}

#[test]
fn rejects_truncated_byte_strings() {
	let err = from_bytes(b"42:foo").expect_err("declared length exceeds input");
	assert!(matches!(err, BencodeError::UnexpectedEof { .. }));
	assert_eq!(err.kind(), ErrorKind::Malformed);

	let err = from_bytes(b"3x:foo").expect_err("bad length digit");
	assert!(matches!(err, BencodeError::UnexpectedByte { context: "string length", .. }));

	let err = from_bytes(b"99999999999999999999:").expect_err("length overflow");
	assert!(matches!(err, BencodeError::InvalidLength { at: 0 }));
}

#[test]
fn decodes_dicts() {
	assert_eq!(from_bytes(b"de").expect("empty"), Value::Dict(BTreeMap::new()));
	assert_eq!(from_bytes(b"d3:fooi42ee").expect("one pair"), dict(&[("foo", Value::Integer(42))]));
	assert_eq!(
		from_bytes(b"d3:fooi42e3:bari24ee").expect("two pairs"),
		dict(&[("foo", Value::Integer(42)), ("bar", Value::Integer(24))])
	);
}

#[test]
fn later_duplicate_key_wins() {
	assert_eq!(from_bytes(b"d1:ai1e1:ai2ee").expect("duplicate"), dict(&[("a", Value::Integer(2))]));
}

#[test]
fn rejects_bad_dicts() {
	let err = from_bytes(b"di42e3:fooe").expect_err("integer key");
	assert!(matches!(err, BencodeError::NonStringKey { at: 1 }));

	let err = from_bytes(b"d3:foofe").expect_err("bad value");
	assert!(matches!(err, BencodeError::UnexpectedByte { byte: 'f', at: 6, .. }));

	let err = from_bytes(b"d").expect_err("missing end");
	assert!(matches!(err, BencodeError::UnexpectedEof { at: 1 }));
}

#[test]
fn decodes_lists() {
	assert_eq!(from_bytes(b"le").expect("empty"), Value::List(Vec::new()));
	assert_eq!(
		from_bytes(b"li42e3:fooe").expect("mixed"),
		Value::List(vec![Value::Integer(42), Value::string("foo")])
	);
	assert_eq!(
		from_bytes(b"lli1eedee").expect("nested"),
		Value::List(vec![Value::List(vec![Value::Integer(1)]), Value::Dict(BTreeMap::new())])
	);
}

#[test]
fn rejects_bad_list_elements() {
	let err = from_bytes(b"lfe").expect_err("invalid discriminator");
	assert!(matches!(err, BencodeError::UnexpectedByte { byte: 'f', at: 1, context: "value" }));
}

#[test]
fn slice_decode_rejects_trailing_data() {
	let err = from_bytes(b"i42eextra").expect_err("trailing bytes");
	assert!(matches!(err, BencodeError::TrailingData { at: 4 }));
}

#[test]
fn slice_decode_with_options_checks_depth_and_trailing_data() {
	let options = DecodeOptions { max_depth: 1 };
	assert_eq!(from_bytes_with_options(b"li1ee", &options).expect("shallow"), Value::List(vec![Value::Integer(1)]));

	let err = from_bytes_with_options(b"llee", &options).expect_err("too deep");
	assert!(matches!(err, BencodeError::DepthExceeded { max_depth: 1 }));

	let err = from_bytes_with_options(b"i1ejunk", &options).expect_err("trailing bytes");
	assert!(matches!(err, BencodeError::TrailingData { at: 3 }));
}

#[test]
fn stream_decode_leaves_remaining_bytes_unread() {
	let mut reader: &[u8] = b"i1e3:two";
	assert_eq!(decode(&mut reader).expect("first value"), Value::Integer(1));
	assert_eq!(reader, b"3:two");
	assert_eq!(decode(&mut reader).expect("second value"), Value::string("two"));
	assert!(reader.fill_buf().expect("buffer").is_empty());
}

#[test]
fn depth_limit_applies_to_nesting() {
	let options = DecodeOptions { max_depth: 2 };
	assert!(decode_with_options(&b"llee"[..], &options).is_ok());

	let err = decode_with_options(&b"llleee"[..], &options).expect_err("too deep");
	assert!(matches!(err, BencodeError::DepthExceeded { max_depth: 2 }));
}

#[test]
fn next_token_pushes_back_length_digit() {
	let mut reader: &[u8] = b"4:spam";
	let mut decoder = Decoder::new(&mut reader);
	assert_eq!(decoder.next_token().expect("token"), Token::Bytes);
	assert_eq!(decoder.position(), 0);
	assert_eq!(decoder.read_bytes::<Bytes>().expect("bytes"), b"spam");
}

#[test]
fn skip_value_consumes_whole_subtree() {
	let mut reader: &[u8] = b"d1:ald1:bi1eeee1:x";
	let mut decoder = Decoder::new(&mut reader);
	decoder.skip_value().expect("skip");
	assert_eq!(decoder.position(), 15);
}
