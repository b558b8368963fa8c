use std::path::PathBuf;

use touca::data::{CaseRecord, Value, flatten, to_display_text};

use crate::cmd::util::{Loaded, emit_json, load};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Print one `path<TAB>value` line per leaf.
	#[arg(long)]
	pub flat: bool,
	#[arg(long)]
	pub json: bool,
	/// Only show this test case of a result file.
	#[arg(long = "case")]
	pub testcase: Option<String>,
}

struct Section {
	testcase: Option<String>,
	text: String,
	value: Value,
}

impl Section {
	fn record(record: &CaseRecord) -> Self {
		Self {
			testcase: Some(record.metadata.testcase.clone()),
			text: record.to_display_text(),
			value: record.results_value(),
		}
	}
}

/// Print a bare value or the records of a result file.
pub fn run(args: Args) -> Result<()> {
	let Args { file, flat, json, testcase } = args;

	let input = load(&file)?;
	let compression = input.compression;
	let kind = input.loaded.label();

	let sections = match testcase {
		Some(testcase) => {
			let results = input.into_results()?;
			let record = results.find(&testcase).ok_or(CliError::CaseNotFound { testcase: testcase.clone() })?;
			vec![Section::record(record)]
		}
		None => match input.loaded {
			Loaded::Value(value) => vec![Section {
				testcase: None,
				text: to_display_text(&value),
				value,
			}],
			Loaded::Results(results) => results.records.iter().map(Section::record).collect(),
		},
	};

	if json {
		let payload = ShowJson {
			path: file.display().to_string(),
			compression: compression.as_str(),
			kind,
			cases: sections
				.iter()
				.map(|section| SectionJson {
					testcase: section.testcase.clone(),
					text: section.text.clone(),
					entries: flatten(&section.value)
						.into_iter()
						.map(|(key, leaf)| EntryJson {
							key,
							kind: leaf.kind().as_str(),
							value: to_display_text(leaf),
						})
						.collect(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	for section in &sections {
		if !flat {
			println!("{}", section.text);
			continue;
		}
		for (key, leaf) in flatten(&section.value) {
			match &section.testcase {
				Some(testcase) => println!("{testcase}\t{key}\t{}", to_display_text(leaf)),
				None => println!("{key}\t{}", to_display_text(leaf)),
			}
		}
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct EntryJson {
	key: String,
	kind: &'static str,
	value: String,
}

#[derive(serde::Serialize)]
struct SectionJson {
	testcase: Option<String>,
	text: String,
	entries: Vec<EntryJson>,
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	compression: &'static str,
	kind: &'static str,
	cases: Vec<SectionJson>,
}
