use std::path::PathBuf;

use thiserror::Error;
use touca::data::DataError;

/// CLI-local result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by `touca` subcommands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Core decoding, lookup, or packaging failure.
	#[error(transparent)]
	Data(#[from] DataError),
	/// Reading or writing a file failed.
	#[error("{path}: {source}")]
	Io {
		/// File being accessed.
		path: PathBuf,
		/// Underlying IO failure.
		source: std::io::Error,
	},
	/// Input document is not valid JSON.
	#[error("{path}: invalid json input: {source}")]
	JsonInput {
		/// Input file.
		path: PathBuf,
		/// Parser failure.
		source: serde_json::Error,
	},
	/// JSON report could not be serialized.
	#[error("json output: {0}")]
	JsonOutput(serde_json::Error),
	/// Flat path does not address any node.
	#[error("path not found: {path}")]
	PathNotFound {
		/// Path as given on the command line.
		path: String,
	},
	/// Requested test case is not in the result file.
	#[error("test case not found: {testcase}")]
	CaseNotFound {
		/// Test case name.
		testcase: String,
	},
	/// Operation needs a different kind of file.
	#[error("{path}: expected a {expected}, found a {got}")]
	KindMismatch {
		/// Offending file.
		path: PathBuf,
		/// Kind the command needs.
		expected: &'static str,
		/// Kind found on disk.
		got: &'static str,
	},
}
