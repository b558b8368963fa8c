use std::io::Read;

use crate::data::{DataError, Result};

const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// zstd frame magic used by compressed captures and result files.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for an encoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}

	/// Detect compression from leading bytes.
	pub fn detect(raw: &[u8]) -> Self {
		if raw.starts_with(&ZSTD_MAGIC) { Self::Zstd } else { Self::None }
	}

	/// Undo this compression, returning `(mode, decoded_bytes)` for any input.
	pub fn decode(raw: Vec<u8>) -> Result<(Self, Vec<u8>)> {
		match Self::detect(&raw) {
			Self::None => Ok((Self::None, raw)),
			Self::Zstd => Ok((Self::Zstd, decode_zstd(&raw)?)),
		}
	}

	/// Apply this compression to `bytes`; `level` is ignored for [`Compression::None`].
	pub fn encode(self, bytes: Vec<u8>, level: i32) -> Result<Vec<u8>> {
		match self {
			Self::None => Ok(bytes),
			Self::Zstd => Ok(zstd::stream::encode_all(bytes.as_slice(), level)?),
		}
	}
}

fn decode_zstd(raw: &[u8]) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > MAX_DECOMPRESSED_BYTES {
			return Err(DataError::DecompressedTooLarge { limit: MAX_DECOMPRESSED_BYTES });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
