use crate::data::{DataError, MalformedReason, Result};

/// Simple bounded cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Build a malformed-encoding error at the current offset.
	pub fn malformed(&self, reason: MalformedReason) -> DataError {
		DataError::MalformedEncoding { at: self.pos, reason }
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(self.malformed(MalformedReason::UnexpectedEof {
				need: n,
				rem: self.remaining(),
			}));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a four-byte code.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(u16::from_le_bytes(buf))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_le_bytes(buf))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		let raw = self.read_exact(8)?;
		let mut buf = [0_u8; 8];
		buf.copy_from_slice(raw);
		Ok(u64::from_le_bytes(buf))
	}

	/// Read an unsigned LEB128 integer of at most ten bytes.
	pub fn read_varint(&mut self) -> Result<u64> {
		let mut out = 0_u64;
		for shift in (0..64).step_by(7) {
			let byte = self.read_u8()?;
			let chunk = u64::from(byte & 0x7f);
			if shift == 63 && chunk > 1 {
				return Err(self.malformed(MalformedReason::VarintOverflow));
			}
			out |= chunk << shift;
			if byte & 0x80 == 0 {
				return Ok(out);
			}
		}
		Err(self.malformed(MalformedReason::VarintOverflow))
	}

	/// Read an element count that must be satisfiable by the remaining input.
	///
	/// `min_size` is the smallest encoded size of one element.
	pub fn read_count(&mut self, min_size: usize) -> Result<usize> {
		let count = self.read_varint()?;
		let fits = usize::try_from(count)
			.ok()
			.and_then(|count| count.checked_mul(min_size))
			.is_some_and(|need| need <= self.remaining());
		if !fits {
			return Err(self.malformed(MalformedReason::CountOutOfRange {
				count,
				rem: self.remaining(),
			}));
		}
		Ok(count as usize)
	}

	/// Read a length-prefixed UTF-8 string.
	pub fn read_string(&mut self) -> Result<String> {
		let len = self.read_varint()?;
		let len = usize::try_from(len).map_err(|_| {
			self.malformed(MalformedReason::UnexpectedEof {
				need: usize::MAX,
				rem: self.remaining(),
			})
		})?;
		let start = self.pos;
		let raw = self.read_exact(len)?;
		String::from_utf8(raw.to_vec()).map_err(|_| DataError::MalformedEncoding {
			at: start,
			reason: MalformedReason::InvalidUtf8,
		})
	}

	/// Fail when unread bytes remain.
	pub fn finish(&self) -> Result<()> {
		if self.remaining() > 0 {
			return Err(self.malformed(MalformedReason::TrailingBytes { rem: self.remaining() }));
		}
		Ok(())
	}
}

/// Growable little-endian byte sink.
#[derive(Default)]
pub struct Writer {
	bytes: Vec<u8>,
}

impl Writer {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return the written bytes.
	pub fn into_inner(self) -> Vec<u8> {
		self.bytes
	}

	/// Append raw bytes.
	pub fn put_bytes(&mut self, bytes: &[u8]) {
		self.bytes.extend_from_slice(bytes);
	}

	/// Append one byte.
	pub fn put_u8(&mut self, value: u8) {
		self.bytes.push(value);
	}

	/// Append a little-endian `u16`.
	pub fn put_u16_le(&mut self, value: u16) {
		self.bytes.extend_from_slice(&value.to_le_bytes());
	}

	/// Append a little-endian `u32`.
	pub fn put_u32_le(&mut self, value: u32) {
		self.bytes.extend_from_slice(&value.to_le_bytes());
	}

	/// Append a little-endian `u64`.
	pub fn put_u64_le(&mut self, value: u64) {
		self.bytes.extend_from_slice(&value.to_le_bytes());
	}

	/// Append an unsigned LEB128 integer.
	pub fn put_varint(&mut self, mut value: u64) {
		while value >= 0x80 {
			self.bytes.push((value as u8 & 0x7f) | 0x80);
			value >>= 7;
		}
		self.bytes.push(value as u8);
	}

	/// Append a length as LEB128.
	pub fn put_len(&mut self, len: usize) {
		self.put_varint(len as u64);
	}

	/// Append a length-prefixed UTF-8 string.
	pub fn put_str(&mut self, value: &str) {
		self.put_len(value.len());
		self.bytes.extend_from_slice(value.as_bytes());
	}
}
