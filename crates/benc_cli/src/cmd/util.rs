use serde::Serialize;

use crate::error::Result;

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Text view of `bytes` when it is valid UTF-8 without control characters.
pub(crate) fn printable_text(bytes: &[u8]) -> Option<&str> {
	let text = std::str::from_utf8(bytes).ok()?;
	if text.chars().any(|ch| ch.is_control() && ch != '\n' && ch != '\t') {
		return None;
	}
	Some(text)
}

/// Lowercase hex rendering of at most `max_len` bytes, with a `...` suffix when cut.
pub(crate) fn hex_preview(bytes: &[u8], max_len: usize) -> String {
	let mut out: String = bytes.iter().take(max_len).map(|byte| format!("{byte:02x}")).collect();
	if bytes.len() > max_len {
		out.push_str("...");
	}
	out
}

/// Keep at most `max_len` Unicode scalar values, with a `...` suffix when cut.
pub(crate) fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

/// Render a byte string for display: quoted text or `bytes[len] hex`.
pub(crate) fn render_bytes(bytes: &[u8], max_len: usize) -> String {
	match printable_text(bytes) {
		Some(text) => format!("{:?}", truncate(text, max_len)),
		None => format!("bytes[{}] {}", bytes.len(), hex_preview(bytes, max_len / 2)),
	}
}
