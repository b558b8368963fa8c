use std::collections::BTreeMap;
use std::time::Duration;

use crate::data::bytes::{Cursor, Writer};
use crate::data::codec::{read_value, write_value};
use crate::data::text::{push_json_string, render_pairs};
use crate::data::{ComparisonReport, DataError, MalformedReason, ObjectValue, Result, ToValue, Value, ValueKind, compare, render_keyed};

const UNKNOWN: &str = "unknown";

/// Identifying slugs of one captured test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseMetadata {
	/// Test case name.
	pub testcase: String,
	/// Team slug, `unknown` when not configured.
	pub team: String,
	/// Suite slug, `unknown` when not configured.
	pub suite: String,
	/// Version of the code under test, `unknown` when not configured.
	pub version: String,
}

impl CaseMetadata {
	/// Metadata for `testcase` with every slug set to `unknown`.
	pub fn new(testcase: impl Into<String>) -> Self {
		Self {
			testcase: testcase.into(),
			team: UNKNOWN.to_owned(),
			suite: UNKNOWN.to_owned(),
			version: UNKNOWN.to_owned(),
		}
	}
}

/// Results, assertions and metrics captured for one test case.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
	/// Identifying slugs.
	pub metadata: CaseMetadata,
	/// Captured results keyed by name.
	pub results: BTreeMap<String, Value>,
	/// Captured assumptions keyed by name; not part of comparisons.
	pub assertions: BTreeMap<String, Value>,
	/// Elapsed durations keyed by name, in whole milliseconds.
	pub metrics: BTreeMap<String, Duration>,
}

impl CaseRecord {
	/// Create an empty record.
	pub fn new(metadata: CaseMetadata) -> Self {
		Self {
			metadata,
			results: BTreeMap::new(),
			assertions: BTreeMap::new(),
			metrics: BTreeMap::new(),
		}
	}

	/// Store a result, replacing any previous value under `key`.
	pub fn add_result(&mut self, key: impl Into<String>, value: impl ToValue) {
		self.results.insert(key.into(), value.into_value());
	}

	/// Store an assertion, replacing any previous value under `key`.
	pub fn add_assertion(&mut self, key: impl Into<String>, value: impl ToValue) {
		self.assertions.insert(key.into(), value.into_value());
	}

	/// Append to the array result under `key`, creating it when absent.
	pub fn add_array_element(&mut self, key: impl Into<String>, value: impl ToValue) -> Result<()> {
		let key = key.into();
		let slot = self.results.entry(key.clone()).or_insert_with(|| Value::Array(Vec::new()));
		match slot {
			Value::Array(items) => {
				items.push(value.into_value());
				Ok(())
			}
			other => Err(DataError::KeyKindMismatch {
				key,
				expected: ValueKind::Array,
				got: other.kind(),
			}),
		}
	}

	/// Store a metric, replacing any previous duration under `key`.
	///
	/// Metrics have millisecond resolution; `elapsed` is truncated to whole
	/// milliseconds so the stored record matches its encoded form.
	pub fn add_metric(&mut self, key: impl Into<String>, elapsed: Duration) {
		self.metrics.insert(key.into(), Duration::from_millis(millis(elapsed)));
	}

	/// Results as one unlabeled object value.
	pub fn results_value(&self) -> Value {
		Value::Object(ObjectValue {
			name: None,
			fields: self.results.clone(),
		})
	}

	/// Compare this record's results, as baseline, against `candidate`'s.
	pub fn compare(&self, candidate: &CaseRecord) -> ComparisonReport {
		compare(&self.results_value(), &candidate.results_value())
	}

	/// Render the record as deterministic JSON-like text.
	pub fn to_display_text(&self) -> String {
		let mut out = String::from("{\"metadata\":{");
		let slugs = [
			("testcase", &self.metadata.testcase),
			("teamslug", &self.metadata.team),
			("testsuite", &self.metadata.suite),
			("version", &self.metadata.version),
		];
		for (index, (key, slug)) in slugs.into_iter().enumerate() {
			if index > 0 {
				out.push(',');
			}
			push_json_string(&mut out, key);
			out.push(':');
			push_json_string(&mut out, slug);
		}
		out.push_str("},\"results\":");
		out.push_str(&render_keyed(&self.results));
		out.push_str(",\"assertions\":");
		out.push_str(&render_keyed(&self.assertions));
		out.push_str(",\"metrics\":");
		out.push_str(&render_pairs(self.metrics.iter().map(|(key, elapsed)| (key.as_str(), millis(*elapsed).to_string()))));
		out.push('}');
		out
	}
}

fn millis(elapsed: Duration) -> u64 {
	u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Encode one record: four metadata strings, results, assertions, then metrics in milliseconds.
pub fn encode_record(record: &CaseRecord) -> Vec<u8> {
	let mut out = Writer::new();
	write_record(&mut out, record);
	out.into_inner()
}

/// Decode one complete record, rejecting trailing bytes.
pub fn decode_record(bytes: &[u8]) -> Result<CaseRecord> {
	let mut cursor = Cursor::new(bytes);
	let record = read_record(&mut cursor)?;
	cursor.finish()?;
	Ok(record)
}

pub(crate) fn write_record(out: &mut Writer, record: &CaseRecord) {
	out.put_str(&record.metadata.testcase);
	out.put_str(&record.metadata.team);
	out.put_str(&record.metadata.suite);
	out.put_str(&record.metadata.version);

	for section in [&record.results, &record.assertions] {
		out.put_len(section.len());
		for (key, value) in section {
			out.put_str(key);
			write_value(out, value);
		}
	}

	out.put_len(record.metrics.len());
	for (key, elapsed) in &record.metrics {
		out.put_str(key);
		out.put_varint(millis(*elapsed));
	}
}

pub(crate) fn read_record(cursor: &mut Cursor<'_>) -> Result<CaseRecord> {
	let metadata = CaseMetadata {
		testcase: cursor.read_string()?,
		team: cursor.read_string()?,
		suite: cursor.read_string()?,
		version: cursor.read_string()?,
	};

	let results = read_section(cursor, read_value)?;
	let assertions = read_section(cursor, read_value)?;
	let metrics = read_section(cursor, |cursor| Ok(Duration::from_millis(cursor.read_varint()?)))?;

	Ok(CaseRecord {
		metadata,
		results,
		assertions,
		metrics,
	})
}

fn read_section<T>(cursor: &mut Cursor<'_>, mut read_item: impl FnMut(&mut Cursor<'_>) -> Result<T>) -> Result<BTreeMap<String, T>> {
	let count = cursor.read_count(2)?;
	let mut out = BTreeMap::new();
	for _ in 0..count {
		let at = cursor.pos();
		let key = cursor.read_string()?;
		if out.contains_key(&key) {
			return Err(DataError::MalformedEncoding {
				at,
				reason: MalformedReason::DuplicateKey { key },
			});
		}
		let item = read_item(cursor)?;
		out.insert(key, item);
	}
	Ok(out)
}

#[cfg(test)]
mod tests;
