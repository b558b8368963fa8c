//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// Write `value` as JSON into `dir/name` and return the file path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
	let path = dir.join(name);
	let text = serde_json::to_string_pretty(value).expect("fixture serializes");
	fs::write(&path, text).expect("fixture is written");
	path
}

/// Baseline capture of a small student record.
pub fn student_baseline() -> Value {
	json!({
		"username": "alex",
		"fullname": "Alex Doe",
		"birth_date": { "year": 1961, "month": 8, "day": 4 },
		"courses": [
			{ "name": "math", "grade": 3.9 },
			{ "name": "computer science", "grade": 3.7 }
		],
		"gpa": 3.8,
		"graduated": false,
		"notes": null,
		"tags": []
	})
}

/// Candidate capture of the student record with one grade changed, one field dropped, one added.
pub fn student_candidate() -> Value {
	json!({
		"username": "alex",
		"fullname": "Alex Doe",
		"birth_date": { "year": 1961, "month": 8, "day": 4 },
		"courses": [
			{ "name": "math", "grade": 3.9 },
			{ "name": "computer science", "grade": 3.3 }
		],
		"gpa": 3.6,
		"graduated": false,
		"tags": [],
		"advisor": "sam"
	})
}
