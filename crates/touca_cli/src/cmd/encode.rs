use std::path::PathBuf;

use touca::data::{CaseMetadata, CaseRecord, Compression, ResultFile, ToValue, encode_binary};
use tracing::debug;

use crate::cmd::util::{load, read_file, write_file};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub input: PathBuf,
	pub output: PathBuf,
	#[arg(long)]
	pub compress: bool,
	#[arg(long, default_value_t = 3)]
	pub level: i32,
	/// Store the document as a result-file record for this test case.
	#[arg(long = "case")]
	pub testcase: Option<String>,
	#[arg(long, requires = "testcase")]
	pub team: Option<String>,
	#[arg(long, requires = "testcase")]
	pub suite: Option<String>,
	#[arg(long, requires = "testcase")]
	pub revision: Option<String>,
	/// Add the record to an existing result file instead of replacing it.
	#[arg(long, requires = "testcase")]
	pub append: bool,
}

/// Encode a JSON document as a bare value or as one record of a result file.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		output,
		compress,
		level,
		testcase,
		team,
		suite,
		revision,
		append,
	} = args;

	let raw = read_file(&input)?;
	let document: serde_json::Value = serde_json::from_slice(&raw).map_err(|source| CliError::JsonInput { path: input.clone(), source })?;

	let bytes = match testcase {
		None => encode_binary(&document.to_value()),
		Some(testcase) => {
			let mut metadata = CaseMetadata::new(testcase);
			if let Some(team) = team {
				metadata.team = team;
			}
			if let Some(suite) = suite {
				metadata.suite = suite;
			}
			if let Some(revision) = revision {
				metadata.version = revision;
			}

			let mut file = if append && output.exists() {
				load(&output)?.into_results()?
			} else {
				ResultFile::new()
			};
			file.records.retain(|record| record.metadata.testcase != metadata.testcase);
			file.records.push(record_from_document(metadata, &document));
			file.to_bytes()
		}
	};

	let compression = if compress { Compression::Zstd } else { Compression::None };
	let bytes = compression.encode(bytes, level)?;
	write_file(&output, &bytes)?;
	debug!(output = %output.display(), size = bytes.len(), compression = compression.as_str(), "wrote file");

	Ok(())
}

/// Top-level object members become results; any other document is stored as `value`.
fn record_from_document(metadata: CaseMetadata, document: &serde_json::Value) -> CaseRecord {
	let mut record = CaseRecord::new(metadata);
	match document {
		serde_json::Value::Object(fields) => {
			for (key, value) in fields {
				record.add_result(key.as_str(), value);
			}
		}
		other => record.add_result("value", other),
	}
	record
}

#[cfg(test)]
mod tests {
	use touca::data::{CaseMetadata, Value};

	use super::record_from_document;

	#[test]
	fn object_members_become_results() {
		let record = record_from_document(CaseMetadata::new("alex"), &touca_testkit::student_baseline());
		assert_eq!(record.results.len(), 8);
		assert_eq!(record.results["gpa"], Value::F64(3.8));
		assert_eq!(record.results["notes"], Value::Null);
	}

	#[test]
	fn scalar_document_is_stored_as_value() {
		let record = record_from_document(CaseMetadata::new("answer"), &serde_json::json!(42));
		assert_eq!(record.results.len(), 1);
		assert_eq!(record.results["value"], Value::I64(42));
	}
}
