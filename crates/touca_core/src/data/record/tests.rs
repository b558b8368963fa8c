use std::time::Duration;

use crate::data::{CaseMetadata, CaseRecord, DataError, MalformedReason, Value, ValueKind, decode_record, encode_record};

fn sample_record() -> CaseRecord {
	let mut record = CaseRecord::new(CaseMetadata {
		testcase: "some-case".to_owned(),
		team: "myteam".to_owned(),
		suite: "mysuite".to_owned(),
		version: "v1".to_owned(),
	});
	record.add_result("some-value", true);
	record.add_array_element("some-array-value", true).expect("new array result");
	record.add_assertion("username", "alex");
	record.add_metric("b", Duration::from_millis(42));
	record
}

#[test]
fn metadata_defaults_to_unknown_slugs() {
	let metadata = CaseMetadata::new("some-case");
	assert_eq!(metadata.team, "unknown");
	assert_eq!(metadata.suite, "unknown");
	assert_eq!(metadata.version, "unknown");
}

#[test]
fn array_elements_append_to_existing_array() {
	let mut record = CaseRecord::new(CaseMetadata::new("case"));
	record.add_array_element("list", 1_i64).expect("creates array");
	record.add_array_element("list", 2_i64).expect("appends");
	assert_eq!(record.results["list"], Value::Array(vec![Value::I64(1), Value::I64(2)]));
}

#[test]
fn array_element_on_scalar_result_fails() {
	let mut record = CaseRecord::new(CaseMetadata::new("case"));
	record.add_result("count", 1_i64);
	let err = record.add_array_element("count", 2_i64).expect_err("scalar result cannot grow");
	assert!(matches!(
		err,
		DataError::KeyKindMismatch {
			ref key,
			expected: ValueKind::Array,
			got: ValueKind::I64
		} if key == "count"
	));
	assert_eq!(record.results["count"], Value::I64(1));
}

#[test]
fn record_round_trips() {
	let record = sample_record();
	let decoded = decode_record(&encode_record(&record)).expect("record decodes");
	assert_eq!(decoded, record);
}

#[test]
fn record_rejects_trailing_bytes() {
	let mut bytes = encode_record(&sample_record());
	bytes.push(0);
	let err = decode_record(&bytes).expect_err("trailing byte must fail");
	assert!(matches!(
		err,
		DataError::MalformedEncoding {
			reason: MalformedReason::TrailingBytes { rem: 1 },
			..
		}
	));
}

#[test]
fn record_text_uses_keyed_sections() {
	let text = sample_record().to_display_text();
	assert_eq!(
		text,
		concat!(
			r#"{"metadata":{"testcase":"some-case","teamslug":"myteam","testsuite":"mysuite","version":"v1"},"#,
			r#""results":[{"key":"some-array-value","value":"[true]"},{"key":"some-value","value":"true"}],"#,
			r#""assertions":[{"key":"username","value":"\"alex\""}],"#,
			r#""metrics":[{"key":"b","value":"42"}]}"#
		)
	);
}

#[test]
fn record_comparison_uses_results_only() {
	let baseline = sample_record();
	let mut candidate = sample_record();
	candidate.add_assertion("username", "sam");
	candidate.add_metric("b", Duration::from_secs(9));
	candidate.add_result("some-value", false);

	let report = baseline.compare(&candidate);
	assert_eq!(report.total_count(), 2);
	assert_eq!(report.score(), 0.5);
	let mismatched: Vec<&str> = report.mismatched().map(|item| item.path.as_str()).collect();
	assert_eq!(mismatched, ["some-value"]);
}

#[test]
fn metrics_keep_whole_milliseconds() {
	let mut record = CaseRecord::new(CaseMetadata::new("timing"));
	record.add_metric("parse", Duration::from_micros(1500));
	assert_eq!(record.metrics["parse"], Duration::from_millis(1));

	let decoded = decode_record(&encode_record(&record)).expect("record decodes");
	assert_eq!(decoded, record);
}
