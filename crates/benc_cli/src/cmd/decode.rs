use std::path::PathBuf;

use benc::bencode::{DecodeOptions, Value, from_bytes_with_options};
use serde_json::{Map, json};

use crate::cmd::util::{emit_json, hex_preview, printable_text, render_bytes};
use crate::error::Result;
use crate::input;

#[derive(clap::Args)]
pub struct Args {
	/// Input file; standard input when omitted.
	pub path: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
}

/// Output truncation limits for printed value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of entries printed for a single dictionary.
	pub max_dict_entries: usize,
	/// Maximum number of characters printed for byte strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for lists.
	pub max_list_items: usize,
	/// Maximum recursive print depth for nested containers.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_dict_entries: 80,
			max_string_len: 120,
			max_list_items: 16,
			max_print_depth: 8,
		}
	}
}

/// Decode the whole input as one dynamic value and print it as a tree or JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json, max_depth } = args;

	let input = input::load(path.as_deref())?;
	let mut options = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		options.max_depth = max_depth;
	}
	let value = from_bytes_with_options(&input.bytes, &options)?;

	if json {
		return emit_json(&DecodeJson {
			path: input.origin,
			compression: input.compression.as_str(),
			bytes: input.bytes.len(),
			kind: value.kind(),
			value: value_json(&value),
		});
	}

	println!("path: {}", input.origin);
	println!("compression: {}", input.compression.as_str());
	println!("bytes: {}", input.bytes.len());
	println!("value:");
	print_value(&value, 2, 0, PrintOptions::default());
	Ok(())
}

/// Print one dynamic value tree.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Absent => println!("{pad}<absent>"),
		Value::Integer(v) => println!("{pad}{v}"),
		Value::Bytes(v) => println!("{pad}{}", render_bytes(v, options.max_string_len)),
		Value::List(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_list_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_list_items {
				println!("{pad}  ... {} more", items.len() - options.max_list_items);
			}
			println!("{pad}]");
		}
		Value::Dict(entries) => {
			if depth >= options.max_print_depth {
				println!("{pad}{{ ... {} entries }}", entries.len());
				return;
			}
			println!("{pad}{{");
			for (key, item) in entries.iter().take(options.max_dict_entries) {
				print!("{pad}  {} = ", render_bytes(key, options.max_string_len));
				if matches!(item, Value::List(_) | Value::Dict(_)) {
					println!();
					print_value(item, indent + 4, depth + 1, options);
				} else {
					print_value(item, 0, depth + 1, options);
				}
			}
			if entries.len() > options.max_dict_entries {
				println!("{pad}  ... {} more entries", entries.len() - options.max_dict_entries);
			}
			println!("{pad}}}");
		}
	}
}

/// JSON rendering of a dynamic value.
///
/// Printable byte strings become JSON strings; other byte strings become
/// `{"len": n, "hex": "..."}`. Dictionary keys are rendered lossily as UTF-8.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Absent => serde_json::Value::Null,
		Value::Integer(v) => json!(v),
		Value::Bytes(v) => match printable_text(v) {
			Some(text) => json!(text),
			None => json!({ "len": v.len(), "hex": hex_preview(v, v.len()) }),
		},
		Value::List(items) => serde_json::Value::Array(items.iter().map(value_json).collect()),
		Value::Dict(entries) => {
			let mut out = Map::new();
			for (key, item) in entries {
				out.insert(String::from_utf8_lossy(key).into_owned(), value_json(item));
			}
			serde_json::Value::Object(out)
		}
	}
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	compression: &'static str,
	bytes: usize,
	kind: &'static str,
	value: serde_json::Value,
}
