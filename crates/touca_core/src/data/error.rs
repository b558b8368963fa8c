use thiserror::Error;

use crate::data::ValueKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors produced while accessing, decoding, and packaging captured values.
#[derive(Debug, Error)]
pub enum DataError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Typed accessor used against a value of another kind.
	#[error("accessor misuse: expected {expected}, got {got}")]
	AccessorMisuse {
		/// Kind the accessor reads.
		expected: ValueKind,
		/// Kind actually stored.
		got: ValueKind,
	},
	/// Binary input was truncated or structurally invalid.
	#[error("malformed encoding at offset {at}: {reason}")]
	MalformedEncoding {
		/// Byte offset where decoding failed.
		at: usize,
		/// Structured failure cause.
		reason: MalformedReason,
	},
	/// Flat path expression syntax is invalid.
	#[error("invalid flat path: {path}")]
	InvalidFlatPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Existing record entry has a different kind than the operation needs.
	#[error("specified key has a different type: {key} (expected {expected}, got {got})")]
	KeyKindMismatch {
		/// Record key.
		key: String,
		/// Kind required by the operation.
		expected: ValueKind,
		/// Kind already stored under the key.
		got: ValueKind,
	},
	/// Unknown leading file magic.
	#[error("unsupported compression or not a result file (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// Decompressed stream did not start with the result-file magic.
	#[error("decompressed data does not start with result-file magic")]
	NotResultFileAfterDecompress,
	/// Unsupported container format version.
	#[error("unsupported result file version {version} (expected 1)")]
	UnsupportedFormatVersion {
		/// Parsed format version.
		version: u16,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

impl DataError {
	/// Whether this error reports corrupt or truncated binary input.
	pub fn is_malformed(&self) -> bool {
		matches!(self, Self::MalformedEncoding { .. })
	}
}

/// Cause attached to [`DataError::MalformedEncoding`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Variable-length integer exceeded 64 bits.
	#[error("varint overflows 64 bits")]
	VarintOverflow,
	/// Value tag byte is not part of the schema.
	#[error("unknown value tag {tag}")]
	UnknownTag {
		/// Offending tag byte.
		tag: u8,
	},
	/// Boolean payload byte was neither 0 nor 1.
	#[error("invalid boolean byte {byte}")]
	InvalidBool {
		/// Offending payload byte.
		byte: u8,
	},
	/// Object name presence flag was neither 0 nor 1.
	#[error("invalid object name flag {flag}")]
	InvalidNameFlag {
		/// Offending flag byte.
		flag: u8,
	},
	/// String payload was not valid UTF-8.
	#[error("string payload is not valid utf-8")]
	InvalidUtf8,
	/// Declared element count cannot fit in the remaining input.
	#[error("declared count {count} exceeds remaining {rem} bytes")]
	CountOutOfRange {
		/// Declared element count.
		count: u64,
		/// Bytes still available.
		rem: usize,
	},
	/// Object carried the same key twice.
	#[error("duplicate object key {key:?}")]
	DuplicateKey {
		/// Repeated key.
		key: String,
	},
	/// Unconsumed bytes followed a complete value.
	#[error("{rem} trailing bytes after value")]
	TrailingBytes {
		/// Unconsumed byte count.
		rem: usize,
	},
}
