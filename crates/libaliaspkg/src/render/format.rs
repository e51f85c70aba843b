use std::{
	fmt::Debug,
	io::Write,
	path::PathBuf,
	process::{Command, Stdio},
};

use tracing::debug;

use crate::error::{AliasError, Result};
use crate::loader::find_tool;

/// Post-processing applied to rendered Go source.
pub trait SourceFormatter: Debug + Send + Sync {
	/// Format `source`, returning the new bytes.
	fn format(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Formats with `goimports`, which also prunes unused imports and adds missing ones.
#[derive(Debug, Clone, Default)]
pub struct GoImports {
	/// Directory used to resolve imports, passed as `-srcdir`.
	pub srcdir: Option<PathBuf>,
}

impl GoImports {
	/// A `goimports` formatter resolving imports relative to the working directory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolve imports as if the output lived in `dir`.
	pub fn with_srcdir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.srcdir = Some(dir.into());
		self
	}
}

impl SourceFormatter for GoImports {
	fn format(&self, source: &[u8]) -> Result<Vec<u8>> {
		let mut command = Command::new(find_tool("goimports")?);
		if let Some(dir) = &self.srcdir {
			command.arg("-srcdir").arg(dir);
		}
		run_filter(command, source)
	}
}

/// Formats with `gofmt`. Imports are left as rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoFmt;

impl SourceFormatter for GoFmt {
	fn format(&self, source: &[u8]) -> Result<Vec<u8>> {
		run_filter(Command::new(find_tool("gofmt")?), source)
	}
}

/// Returns the rendered source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
	fn format(&self, source: &[u8]) -> Result<Vec<u8>> {
		Ok(source.to_vec())
	}
}

/// Pipe `input` through `command`, failing with its stderr when it exits unsuccessfully.
fn run_filter(mut command: Command, input: &[u8]) -> Result<Vec<u8>> {
	debug!(program = ?command.get_program(), "formatting generated source");
	let mut child = command
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()?;
	if let Some(mut stdin) = child.stdin.take() {
		stdin.write_all(input)?;
	}
	let output = child.wait_with_output()?;
	if !output.status.success() {
		return Err(AliasError::Format(
			String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
		));
	}
	Ok(output.stdout)
}
