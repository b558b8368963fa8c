mod bytes;
mod codec;
mod compare;
mod compression;
mod convert;
mod error;
mod file;
mod flatten;
mod path;
mod record;
mod text;
mod value;

/// Binary encoding entry points.
pub use codec::{decode_binary, encode_binary};
/// Structural comparison types and entry points.
pub use compare::{CommonKey, ComparisonReport, compare, compare_flat};
/// Compression detection result.
pub use compression::{Compression, ZSTD_MAGIC};
/// Conversion of user types into values.
pub use convert::ToValue;
/// Error and result aliases.
pub use error::{DataError, MalformedReason, Result};
/// Result-file container.
pub use file::{RESULT_FILE_MAGIC, RESULT_FILE_VERSION, ResultFile};
/// Flattening entry point and output type.
pub use flatten::{FlatMap, flatten};
/// Flat path parser types.
pub use path::{FlatPath, PathStep};
/// Per-test-case record shape and its binary encoding.
pub use record::{CaseMetadata, CaseRecord, decode_record, encode_record};
/// Human-readable rendering.
pub use text::{render_keyed, to_display_text};
/// Value model types.
pub use value::{ArrayBuilder, ObjectValue, Value, ValueKind};
