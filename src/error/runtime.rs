/// Failure raised by the compiled callable while it runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{}{message}", prefix(.line))]
pub struct RuntimeFailure {
	/// Line of the operation that failed, when the IR node carried one.
	pub line:    Option<usize>,
	pub message: String,
}

impl RuntimeFailure {
	pub fn new(line: usize, message: impl Into<String>) -> Self { Self { line: Some(line), message: message.into() } }

	pub fn unlocated(message: impl Into<String>) -> Self { Self { line: None, message: message.into() } }
}

fn prefix(line: &Option<usize>) -> String {
	match line {
		Some(line) => format!("[line {line}] "),
		None => "Runtime Error: ".to_string(),
	}
}
