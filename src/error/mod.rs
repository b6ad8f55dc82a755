pub mod diagnostic;
pub mod emitter;
pub mod parser;
pub mod runtime;
pub mod scanner;

/// Why a single `compile_and_run` call stopped.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RunError {
	/// Resolution or type error found while lowering, nothing ran.
	#[error(transparent)]
	Emit(#[from] emitter::EmitError),
	/// The compiled callable failed.
	#[error(transparent)]
	Runtime(#[from] runtime::RuntimeFailure),
}

/// TyploxError is the top-level error type of the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TyploxError {
	/// Internal compiler error, or failure of the host around it
	#[error("CompilerInternalError: {0}")]
	InternalError(#[from] anyhow::Error),
	/// Scanner errors encountered during scanning
	#[error("Generated {0} scanner errors")]
	ScannerErrors(usize),
	/// Parser errors encountered during parsing
	#[error("Generated {0} parser errors")]
	ParserErrors(usize),
	/// Emission or runtime failure
	#[error("{0}")]
	Run(#[from] RunError),
}
