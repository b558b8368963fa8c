use crate::data::bytes::{Cursor, Writer};
use crate::data::record::{read_record, write_record};
use crate::data::{CaseRecord, Compression, DataError, Result};

/// Leading magic of an uncompressed result file.
pub const RESULT_FILE_MAGIC: [u8; 4] = *b"TUCA";
/// Result file format version written and accepted by this crate.
pub const RESULT_FILE_VERSION: u16 = 1;

/// Container bundling the records of many test cases.
///
/// Layout: magic, little-endian `u16` version, LEB128 record count, then
/// each record prefixed by its LEB128 byte length so that a reader can
/// skip or slice individual records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultFile {
	/// Records in submission order.
	pub records: Vec<CaseRecord>,
}

impl ResultFile {
	/// Create an empty container.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `bytes` (already decompressed) start with the result-file magic.
	pub fn is_result_file(bytes: &[u8]) -> bool {
		bytes.starts_with(&RESULT_FILE_MAGIC)
	}

	/// Return the first record captured for `testcase`.
	pub fn find(&self, testcase: &str) -> Option<&CaseRecord> {
		self.records.iter().find(|record| record.metadata.testcase == testcase)
	}

	/// Serialize into the uncompressed container layout.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Writer::new();
		out.put_bytes(&RESULT_FILE_MAGIC);
		out.put_u16_le(RESULT_FILE_VERSION);
		out.put_len(self.records.len());
		for record in &self.records {
			let mut body = Writer::new();
			write_record(&mut body, record);
			let body = body.into_inner();
			out.put_len(body.len());
			out.put_bytes(&body);
		}
		out.into_inner()
	}

	/// Serialize and compress with zstd at `level`.
	pub fn to_compressed_bytes(&self, level: i32) -> Result<Vec<u8>> {
		Compression::Zstd.encode(self.to_bytes(), level)
	}

	/// Detect compression and parse a container.
	pub fn from_bytes(raw: Vec<u8>) -> Result<(Compression, Self)> {
		let magic = first4(&raw);
		let (compression, bytes) = Compression::decode(raw)?;
		if !Self::is_result_file(&bytes) {
			return Err(match compression {
				Compression::None => DataError::UnknownMagic { magic },
				Compression::Zstd => DataError::NotResultFileAfterDecompress,
			});
		}
		Ok((compression, Self::parse(&bytes)?))
	}

	/// Parse an uncompressed container.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		let magic = cursor.read_code4()?;
		if magic != RESULT_FILE_MAGIC {
			return Err(DataError::UnknownMagic { magic });
		}

		let version = cursor.read_u16_le()?;
		if version != RESULT_FILE_VERSION {
			return Err(DataError::UnsupportedFormatVersion { version });
		}

		let count = cursor.read_count(1)?;
		let mut records = Vec::with_capacity(count);
		for _ in 0..count {
			let len = cursor.read_count(1)?;
			let start = cursor.pos();
			let body = cursor.read_exact(len)?;
			let mut inner = Cursor::new(body);
			let record = read_record(&mut inner).map_err(|err| shift_offset(err, start))?;
			inner.finish().map_err(|err| shift_offset(err, start))?;
			records.push(record);
		}
		cursor.finish()?;

		Ok(Self { records })
	}
}

fn shift_offset(err: DataError, base: usize) -> DataError {
	match err {
		DataError::MalformedEncoding { at, reason } => DataError::MalformedEncoding { at: base + at, reason },
		other => other,
	}
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut magic = [0_u8; 4];
	let take = bytes.len().min(4);
	magic[..take].copy_from_slice(&bytes[..take]);
	magic
}

#[cfg(test)]
mod tests;
