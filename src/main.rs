use std::process::ExitCode;

use clap::Parser;
use typlox::{Typlox, cli::*};

fn main() -> ExitCode {
	let cli = Cli::parse();
	tracing_subscriber::fmt().with_max_level(cli.log_level()).with_writer(std::io::stderr).init();

	let typlox = Typlox::new(cli.options());
	match cli.mode {
		Mode::File { path } => {
			if let Err(e) = typlox.run_file(&path) {
				eprintln!("Failed run file: {e}");
				return ExitCode::FAILURE;
			}
		}
		Mode::Repl => typlox.run_prompt(),
	}
	ExitCode::SUCCESS
}
