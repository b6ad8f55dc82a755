#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use typlox::{RunOptions, Typlox, TyploxError};

	fn fixture(name: &str) -> PathBuf { PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(name) }

	#[test]
	fn test_typlox_file() {
		let typlox = Typlox::new(RunOptions { timing: true });
		let result = typlox.run_file(fixture("showcase.tl"));
		assert!(result.is_ok(), "{result:?}");
	}

	#[test]
	fn missing_file_is_an_internal_error() {
		let result = Typlox::default().run_file(fixture("missing.tl"));
		assert!(matches!(result, Err(TyploxError::InternalError(_))));
	}

	#[test]
	fn showcase_output() {
		let source = std::fs::read_to_string(fixture("showcase.tl")).unwrap();
		let mut out = Vec::new();
		Typlox::default().run_source(&source, &mut out).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "42\n10.5\n10\nA\ncount: 21\n9\n10\ntrue\n234\n");
	}
}
