use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use touca::data::{Compression, ResultFile, Value, decode_binary};
use tracing::debug;

use crate::cmd::{CliError, Result};

/// Decoded contents of a file given on the command line.
pub(crate) enum Loaded {
	/// Bare encoded value.
	Value(Value),
	/// Result file with one record per test case.
	Results(ResultFile),
}

impl Loaded {
	pub(crate) fn label(&self) -> &'static str {
		match self {
			Self::Value(_) => "value",
			Self::Results(_) => "result file",
		}
	}
}

/// A loaded file together with how it was stored.
pub(crate) struct Input {
	pub path: PathBuf,
	pub compression: Compression,
	pub loaded: Loaded,
}

impl Input {
	pub(crate) fn into_results(self) -> Result<ResultFile> {
		match self.loaded {
			Loaded::Results(file) => Ok(file),
			other => Err(CliError::KindMismatch {
				path: self.path,
				expected: "result file",
				got: other.label(),
			}),
		}
	}
}

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
	fs::read(path).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
	fs::write(path, bytes).map_err(|source| CliError::Io {
		path: path.to_path_buf(),
		source,
	})
}

/// Read, decompress, and decode a bare value or a result file.
pub(crate) fn load(path: &Path) -> Result<Input> {
	let raw = read_file(path)?;
	let size = raw.len();
	let (compression, bytes) = Compression::decode(raw)?;
	debug!(path = %path.display(), size, decoded = bytes.len(), compression = compression.as_str(), "loaded file");

	let loaded = if ResultFile::is_result_file(&bytes) {
		Loaded::Results(ResultFile::parse(&bytes)?)
	} else {
		Loaded::Value(decode_binary(&bytes)?)
	};

	Ok(Input {
		path: path.to_path_buf(),
		compression,
		loaded,
	})
}

/// Print one JSON document on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	let text = serde_json::to_string_pretty(payload).map_err(CliError::JsonOutput)?;
	println!("{text}");
	Ok(())
}
