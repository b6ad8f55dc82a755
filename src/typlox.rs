use std::{
	fs::read_to_string,
	io::{self, Write},
	path::Path,
	time::Instant,
};

use anyhow::Context;

use crate::{TyploxError, error::diagnostic::Diagnostics, interpreter::compile_and_run, parser::parse, scanner::lex};

/// Switches for one [`Typlox`] instance, set from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
	/// Log the duration of every phase at info level.
	pub timing: bool,
}

/// Typlox drives source text through every phase and runs it.
#[derive(Debug, Default)]
pub struct Typlox {
	options: RunOptions,
}

impl Typlox {
	pub fn new(options: RunOptions) -> Self { Self { options } }

	/// Run a source file, printing to stdout.
	pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TyploxError> {
		let path = path.as_ref();
		let source = read_to_string(path).with_context(|| format!("Failed open source file {}", path.display()))?;
		tracing::debug!(path = %path.display(), bytes = source.len(), "source loaded");
		let stdout = io::stdout();
		self.run_source(&source, &mut stdout.lock())
	}

	/// Run the REPL prompt. Every line is a separate program.
	pub fn run_prompt(&self) {
		let mut input = String::new();
		let stdin = io::stdin();
		loop {
			input.clear();
			print!("> ");
			if let Err(e) = io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited typlox repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if let Err(e) = self.run_source(input.trim(), &mut io::stdout().lock()) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}

	/// Scan, parse, emit and run `source`, writing program output to `out`.
	///
	/// Lexical and syntax diagnostics go to stderr as they are found. The
	/// parser still runs after scanner errors so one pass reports as much as
	/// it can, but nothing is emitted once either phase reported anything.
	pub fn run_source(&self, source: &str, out: &mut dyn Write) -> Result<(), TyploxError> {
		let started = Instant::now();
		let (tokens, scan_diagnostics) = lex(source);
		self.phase_finished("scan", started, tokens.len());
		report(&scan_diagnostics);

		let started = Instant::now();
		let (statements, parse_diagnostics) = parse(tokens);
		self.phase_finished("parse", started, statements.len());
		report(&parse_diagnostics);

		if scan_diagnostics.has_errors() {
			return Err(TyploxError::ScannerErrors(scan_diagnostics.len()));
		}
		if parse_diagnostics.has_errors() {
			return Err(TyploxError::ParserErrors(parse_diagnostics.len()));
		}

		let started = Instant::now();
		let result = compile_and_run(&statements, out);
		self.phase_finished("run", started, statements.len());
		Ok(result?)
	}

	fn phase_finished(&self, phase: &'static str, started: Instant, count: usize) {
		if self.options.timing {
			tracing::info!(phase, count, elapsed = ?started.elapsed(), "phase finished");
		}
	}
}

fn report(diagnostics: &Diagnostics) {
	for diagnostic in diagnostics.iter() {
		eprintln!("{diagnostic}");
	}
}
