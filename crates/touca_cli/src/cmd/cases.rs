use std::path::PathBuf;

use crate::cmd::Result;
use crate::cmd::util::{emit_json, load};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// List the records of a result file with their metadata and section sizes.
pub fn run(args: Args) -> Result<()> {
	let Args { file, json } = args;

	let input = load(&file)?;
	let compression = input.compression;
	let results = input.into_results()?;

	if json {
		let payload = CasesJson {
			path: file.display().to_string(),
			compression: compression.as_str(),
			cases: results
				.records
				.iter()
				.map(|record| CaseJson {
					testcase: record.metadata.testcase.clone(),
					teamslug: record.metadata.team.clone(),
					testsuite: record.metadata.suite.clone(),
					version: record.metadata.version.clone(),
					results: record.results.len(),
					assertions: record.assertions.len(),
					metrics: record.metrics.len(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", file.display());
	println!("compression: {}", compression.as_str());
	println!("cases: {}", results.records.len());
	println!("testcase\tteam\tsuite\tversion\tresults\tassertions\tmetrics");
	for record in &results.records {
		let metadata = &record.metadata;
		println!(
			"{}\t{}\t{}\t{}\t{}\t{}\t{}",
			metadata.testcase,
			metadata.team,
			metadata.suite,
			metadata.version,
			record.results.len(),
			record.assertions.len(),
			record.metrics.len()
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct CaseJson {
	testcase: String,
	teamslug: String,
	testsuite: String,
	version: String,
	results: usize,
	assertions: usize,
	metrics: usize,
}

#[derive(serde::Serialize)]
struct CasesJson {
	path: String,
	compression: &'static str,
	cases: Vec<CaseJson>,
}
