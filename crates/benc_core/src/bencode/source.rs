use std::io::{BufRead, ErrorKind, Read};

use crate::bencode::{BencodeError, Result};

// Caps the up-front buffer reservation for a declared byte string length.
const READ_RESERVE_LIMIT: u64 = 64 * 1024;

/// Forward-only byte reader with a single byte of pushback.
pub(crate) struct ByteSource<'a> {
	reader: &'a mut dyn BufRead,
	pushback: Option<u8>,
	last: Option<u8>,
	pos: u64,
}

impl<'a> ByteSource<'a> {
	/// Wrap a buffered reader positioned at offset 0.
	pub(crate) fn new(reader: &'a mut dyn BufRead) -> Self {
		Self {
			reader,
			pushback: None,
			last: None,
			pos: 0,
		}
	}

	/// Offset of the next unread byte.
	pub(crate) fn pos(&self) -> u64 {
		self.pos
	}

	/// Read one byte, preferring the pushback slot.
	pub(crate) fn read_byte(&mut self) -> Result<u8> {
		let byte = match self.pushback.take() {
			Some(byte) => byte,
			None => self.next_buffered()?,
		};
		self.pos += 1;
		self.last = Some(byte);
		Ok(byte)
	}

	/// Push the last byte read back into the source.
	///
	/// Only one byte of pushback exists; a second call without an intervening read is a no-op.
	pub(crate) fn unread_byte(&mut self) {
		if let Some(byte) = self.last.take() {
			debug_assert!(self.pushback.is_none());
			self.pushback = Some(byte);
			self.pos -= 1;
		}
	}

	/// Consume the next byte if it equals `expected`, else leave it unread.
	pub(crate) fn next_is(&mut self, expected: u8) -> Result<bool> {
		if self.read_byte()? == expected {
			return Ok(true);
		}
		self.unread_byte();
		Ok(false)
	}

	/// Read exactly `len` bytes.
	pub(crate) fn read_exact(&mut self, len: u64) -> Result<Vec<u8>> {
		let start = self.pos;
		let mut out = Vec::with_capacity(usize::try_from(len.min(READ_RESERVE_LIMIT)).unwrap_or(0));
		let mut need = len;

		if need > 0 {
			if let Some(byte) = self.pushback.take() {
				out.push(byte);
				need -= 1;
			}
		}

		let read = Read::take(&mut *self.reader, need).read_to_end(&mut out)?;
		self.pos += out.len() as u64;
		self.last = None;

		if (read as u64) < need {
			return Err(BencodeError::UnexpectedEof { at: start + out.len() as u64 });
		}
		Ok(out)
	}

	fn next_buffered(&mut self) -> Result<u8> {
		let byte = loop {
			match self.reader.fill_buf() {
				Ok(buf) => match buf.first() {
					Some(byte) => break *byte,
					None => return Err(BencodeError::UnexpectedEof { at: self.pos }),
				},
				Err(err) if err.kind() == ErrorKind::Interrupted => continue,
				Err(err) => return Err(err.into()),
			}
		};
		self.reader.consume(1);
		Ok(byte)
	}
}
