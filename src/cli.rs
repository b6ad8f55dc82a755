use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::RunOptions;

#[derive(Parser, Debug)]
#[command(
	name = "typlox",
	version,
	after_long_help = "A statically-typed scripting language, compiled to typed IR and run."
)]
pub struct Cli {
	/// Log how long each phase takes
	#[arg(long, global = true)]
	pub timing:  bool,
	/// Log phase internals
	#[arg(short, long, global = true)]
	pub verbose: bool,
	#[command(subcommand)]
	pub mode:    Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Input file
	File { path: PathBuf },
	/// Input prompt
	Repl,
}

impl Cli {
	pub fn options(&self) -> RunOptions { RunOptions { timing: self.timing } }

	/// Most detailed events the subscriber lets through.
	pub fn log_level(&self) -> LevelFilter {
		match (self.verbose, self.timing) {
			(true, _) => LevelFilter::DEBUG,
			(false, true) => LevelFilter::INFO,
			(false, false) => LevelFilter::WARN,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flags_reach_run_options() {
		let cli = Cli::parse_from(["typlox", "--timing", "file", "main.tl"]);
		assert!(matches!(cli.mode, Mode::File { ref path } if path == &PathBuf::from("main.tl")));
		assert!(cli.options().timing);

		let cli = Cli::parse_from(["typlox", "repl", "-v"]);
		assert!(matches!(cli.mode, Mode::Repl));
		assert!(cli.verbose);
	}

	#[test]
	fn verbose_raises_the_log_level() {
		assert_eq!(Cli::parse_from(["typlox", "repl"]).log_level(), LevelFilter::WARN);
		assert_eq!(Cli::parse_from(["typlox", "--timing", "repl"]).log_level(), LevelFilter::INFO);
		assert_eq!(Cli::parse_from(["typlox", "repl", "--verbose"]).log_level(), LevelFilter::DEBUG);
		assert_eq!(Cli::parse_from(["typlox", "-v", "--timing", "repl"]).log_level(), LevelFilter::DEBUG);
	}
}
