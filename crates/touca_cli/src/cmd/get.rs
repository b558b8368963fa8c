use std::path::PathBuf;

use touca::data::{FlatPath, to_display_text};

use crate::cmd::util::{Loaded, load};
use crate::cmd::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Flat path such as `courses[1].grade`; empty for the root.
	pub path: String,
	/// Look the path up in this test case only.
	#[arg(long = "case")]
	pub testcase: Option<String>,
}

/// Print the display text of the node addressed by a flat path.
///
/// Result files are searched case by case, printing `case<TAB>value` for
/// every record that has the path.
pub fn run(args: Args) -> Result<()> {
	let Args { file, path, testcase } = args;

	let flat_path = FlatPath::parse(&path)?;
	let input = load(&file)?;

	if let Some(testcase) = testcase {
		let results = input.into_results()?;
		let record = results.find(&testcase).ok_or(CliError::CaseNotFound { testcase: testcase.clone() })?;
		let node = record.results_value();
		let found = node.lookup(&flat_path).ok_or(CliError::PathNotFound { path })?;
		println!("{}", to_display_text(found));
		return Ok(());
	}

	match input.loaded {
		Loaded::Value(value) => {
			let found = value.lookup(&flat_path).ok_or(CliError::PathNotFound { path })?;
			println!("{}", to_display_text(found));
		}
		Loaded::Results(results) => {
			let mut hits = 0_usize;
			for record in &results.records {
				let node = record.results_value();
				if let Some(found) = node.lookup(&flat_path) {
					println!("{}\t{}", record.metadata.testcase, to_display_text(found));
					hits += 1;
				}
			}
			if hits == 0 {
				return Err(CliError::PathNotFound { path });
			}
		}
	}

	Ok(())
}
