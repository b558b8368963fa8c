#![allow(missing_docs)]

use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "touca", about = "Inspect and compare captured test results")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a JSON document as a binary value or a result-file record.
	Encode(cmd::encode::Args),
	/// Print a capture or result file.
	Show(cmd::show::Args),
	/// Print the node at a flat path.
	Get(cmd::get::Args),
	/// Compare two captures or two result files.
	Compare(cmd::compare::Args),
	/// List the test cases of a result file.
	Cases(cmd::cases::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_target(false)
		.with_writer(io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Show(args) => cmd::show::run(args),
		Commands::Get(args) => cmd::get::run(args),
		Commands::Compare(args) => cmd::compare::run(args),
		Commands::Cases(args) => cmd::cases::run(args),
	}
}
