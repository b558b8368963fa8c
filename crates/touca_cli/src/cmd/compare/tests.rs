use touca::data::{CaseMetadata, CaseRecord, ResultFile, ToValue, compare};

use super::{compare_files, report_json};

fn record(testcase: &str, student: serde_json::Value) -> CaseRecord {
	let mut record = CaseRecord::new(CaseMetadata::new(testcase));
	record.add_result("student", student);
	record
}

#[test]
fn report_json_lists_mismatches_with_display_text() {
	let report = compare(
		&touca_testkit::student_baseline().to_value(),
		&touca_testkit::student_candidate().to_value(),
	);
	let json = report_json(&report);

	assert_eq!(json.matched, 10);
	assert_eq!(json.total, 14);
	assert_eq!(json.missing_keys, ["notes"]);
	assert_eq!(json.new_keys, ["advisor"]);
	let changed: Vec<(&str, &str, &str)> = json
		.mismatched
		.iter()
		.map(|item| (item.path.as_str(), item.baseline.as_str(), item.candidate.as_str()))
		.collect();
	assert_eq!(changed, [("courses[1].grade", "3.7", "3.3"), ("gpa", "3.8", "3.6")]);
}

#[test]
fn result_files_pair_cases_by_name() {
	let baseline = ResultFile {
		records: vec![
			record("alice", touca_testkit::student_baseline()),
			record("bob", touca_testkit::student_baseline()),
			record("alice", serde_json::json!(null)),
		],
	};
	let candidate = ResultFile {
		records: vec![
			record("carol", touca_testkit::student_baseline()),
			record("alice", touca_testkit::student_candidate()),
			record("carol", touca_testkit::student_baseline()),
		],
	};

	let comparison = compare_files(&baseline, &candidate);
	assert_eq!(comparison.cases.len(), 1);
	let (testcase, report) = &comparison.cases[0];
	assert_eq!(testcase, "alice");
	assert_eq!(report.matched_count(), 10);
	assert_eq!(comparison.missing_cases, ["bob"]);
	assert_eq!(comparison.new_cases, ["carol"]);
}

#[test]
fn identical_result_files_score_one() {
	let file = ResultFile {
		records: vec![record("alice", touca_testkit::student_baseline())],
	};
	let comparison = compare_files(&file, &file.clone());
	assert!(comparison.cases.iter().all(|(_, report)| report.is_identical()));
	assert!(comparison.missing_cases.is_empty());
	assert!(comparison.new_cases.is_empty());
}
