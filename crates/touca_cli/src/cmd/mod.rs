/// Result-file case listing command.
pub mod cases;
/// Capture and result-file comparison command.
pub mod compare;
/// JSON to binary encoding command.
pub mod encode;
/// Flat path lookup command.
pub mod get;
/// Capture printing command.
pub mod show;

mod error;
mod util;

pub use error::{CliError, Result};
