#![allow(missing_docs)]

use std::collections::BTreeMap;

use benc::bencode::{Value, from_bytes, to_bytes};
use bytes::Bytes;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

fn byte_string() -> impl Strategy<Value = Bytes> {
	vec(any::<u8>(), 0..24).prop_map(Bytes::from)
}

fn value_tree() -> impl Strategy<Value = Value> {
	let leaf = prop_oneof![any::<i64>().prop_map(Value::Integer), byte_string().prop_map(Value::Bytes)];
	leaf.prop_recursive(4, 48, 6, |inner| {
		prop_oneof![
			vec(inner.clone(), 0..6).prop_map(Value::List),
			btree_map(byte_string(), inner, 0..6).prop_map(Value::Dict),
		]
	})
}

proptest! {
	#[test]
	fn dynamic_values_round_trip(value in value_tree()) {
		let encoded = to_bytes(&value).expect("encode");
		let decoded = from_bytes(&encoded).expect("decode");
		prop_assert_eq!(&decoded, &value);
	}

	#[test]
	fn re_encoding_decoded_bytes_is_stable(value in value_tree()) {
		let first = to_bytes(&value).expect("encode");
		let second = to_bytes(&from_bytes(&first).expect("decode")).expect("re-encode");
		prop_assert_eq!(first, second);
	}

	#[test]
	fn integer_text_matches_decimal_rendering(number in any::<i64>()) {
		let encoded = to_bytes(&Value::Integer(number)).expect("encode");
		prop_assert_eq!(encoded, format!("i{number}e").into_bytes());
	}
}

#[test]
fn empty_containers_round_trip() {
	for value in [Value::List(Vec::new()), Value::Dict(BTreeMap::new())] {
		let encoded = to_bytes(&value).expect("encode");
		assert_eq!(from_bytes(&encoded).expect("decode"), value);
	}
}
