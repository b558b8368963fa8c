use std::collections::BTreeSet;
use std::path::PathBuf;

use touca::data::{ComparisonReport, ResultFile, compare, to_display_text};
use tracing::debug;

use crate::cmd::util::{Loaded, emit_json, load};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub baseline: PathBuf,
	pub candidate: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Compare two bare values, or two result files case by case.
pub fn run(args: Args) -> Result<()> {
	let Args { baseline, candidate, json } = args;

	let baseline_input = load(&baseline)?;
	let candidate_input = load(&candidate)?;

	match (baseline_input.loaded, candidate_input.loaded) {
		(Loaded::Value(left), Loaded::Value(right)) => {
			let report = compare(&left, &right);
			debug!(score = report.score(), matched = report.matched_count(), total = report.total_count(), "compared values");
			if json {
				return emit_json(&report_json(&report));
			}
			print_report(&report, "");
		}
		(Loaded::Results(left), Loaded::Results(right)) => {
			let comparison = compare_files(&left, &right);
			debug!(
				cases = comparison.cases.len(),
				missing = comparison.missing_cases.len(),
				new = comparison.new_cases.len(),
				"compared result files"
			);
			if json {
				return emit_json(&file_json(&comparison));
			}
			for (testcase, report) in &comparison.cases {
				println!("case: {testcase}");
				print_report(report, "  ");
			}
			for testcase in &comparison.missing_cases {
				println!("missing case: {testcase}");
			}
			for testcase in &comparison.new_cases {
				println!("new case: {testcase}");
			}
		}
		(left, right) => {
			return Err(CliError::KindMismatch {
				path: candidate,
				expected: left.label(),
				got: right.label(),
			});
		}
	}

	Ok(())
}

/// Per-case reports of two result files, matched by test case name.
pub(crate) struct FileComparison {
	pub cases: Vec<(String, ComparisonReport)>,
	pub missing_cases: Vec<String>,
	pub new_cases: Vec<String>,
}

/// Pair records by test case name; the first record of a repeated name wins.
pub(crate) fn compare_files(baseline: &ResultFile, candidate: &ResultFile) -> FileComparison {
	let mut seen = BTreeSet::new();
	let mut cases = Vec::new();
	let mut missing_cases = Vec::new();

	for record in &baseline.records {
		let testcase = &record.metadata.testcase;
		if !seen.insert(testcase.as_str()) {
			continue;
		}
		match candidate.find(testcase) {
			Some(other) => cases.push((testcase.clone(), record.compare(other))),
			None => missing_cases.push(testcase.clone()),
		}
	}

	let mut new_cases = Vec::new();
	for record in &candidate.records {
		let testcase = record.metadata.testcase.as_str();
		if !seen.contains(testcase) && !new_cases.iter().any(|item| item == testcase) {
			new_cases.push(testcase.to_owned());
		}
	}

	FileComparison {
		cases,
		missing_cases,
		new_cases,
	}
}

fn print_report(report: &ComparisonReport, pad: &str) {
	println!("{pad}score: {:.4}", report.score());
	println!("{pad}matched: {}/{}", report.matched_count(), report.total_count());
	for key in report.missing_keys() {
		println!("{pad}missing: {key}");
	}
	for key in report.new_keys() {
		println!("{pad}new: {key}");
	}
	for item in report.mismatched() {
		println!(
			"{pad}changed: {}: {} -> {}",
			item.path,
			to_display_text(&item.baseline),
			to_display_text(&item.candidate)
		);
	}
}

pub(crate) fn report_json(report: &ComparisonReport) -> ReportJson {
	ReportJson {
		score: report.score(),
		matched: report.matched_count(),
		total: report.total_count(),
		missing_keys: report.missing_keys().to_vec(),
		new_keys: report.new_keys().to_vec(),
		mismatched: report
			.mismatched()
			.map(|item| MismatchJson {
				path: item.path.clone(),
				baseline: to_display_text(&item.baseline),
				candidate: to_display_text(&item.candidate),
			})
			.collect(),
	}
}

fn file_json(comparison: &FileComparison) -> FileCompareJson {
	FileCompareJson {
		cases: comparison
			.cases
			.iter()
			.map(|(testcase, report)| CaseReportJson {
				testcase: testcase.clone(),
				report: report_json(report),
			})
			.collect(),
		missing_cases: comparison.missing_cases.clone(),
		new_cases: comparison.new_cases.clone(),
	}
}

#[derive(serde::Serialize)]
pub(crate) struct MismatchJson {
	pub path: String,
	pub baseline: String,
	pub candidate: String,
}

#[derive(serde::Serialize)]
pub(crate) struct ReportJson {
	pub score: f64,
	pub matched: usize,
	pub total: usize,
	pub missing_keys: Vec<String>,
	pub new_keys: Vec<String>,
	pub mismatched: Vec<MismatchJson>,
}

#[derive(serde::Serialize)]
struct CaseReportJson {
	testcase: String,
	#[serde(flatten)]
	report: ReportJson,
}

#[derive(serde::Serialize)]
struct FileCompareJson {
	cases: Vec<CaseReportJson>,
	missing_cases: Vec<String>,
	new_cases: Vec<String>,
}

#[cfg(test)]
mod tests;
