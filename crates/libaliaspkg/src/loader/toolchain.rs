use std::{path::PathBuf, process::Command};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AliasError, Result};

static GO_RELEASE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^go\d+\.\d+").expect("valid Go release pattern"));

/// Locate an executable on `PATH`.
pub fn find_tool(name: &str) -> Result<PathBuf> {
	which::which(name).map_err(|_| AliasError::ToolNotFound(name.to_string()))
}

/// The active Go release as `goMAJOR.MINOR`, from `go env GOVERSION`.
pub fn go_build_version() -> Result<String> {
	let output = Command::new(find_tool("go")?)
		.args(["env", "GOVERSION"])
		.output()?;
	if !output.status.success() {
		return Err(AliasError::Load {
			target: "go env GOVERSION".to_string(),
			message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
		});
	}
	let reported = String::from_utf8_lossy(&output.stdout);
	normalize_go_version(reported.trim()).ok_or_else(|| AliasError::Load {
		target: "go env GOVERSION".to_string(),
		message: format!("unrecognised Go version '{}'", reported.trim()),
	})
}

/// Trim a Go version such as `go1.22.3` or `go1.23rc1` down to its release, `go1.22`.
pub fn normalize_go_version(version: &str) -> Option<String> {
	GO_RELEASE
		.find(version)
		.map(|release| release.as_str().to_string())
}

/// File name for a version-specific alias file: `go1.22` becomes `alias_go1_22.go`.
pub fn versioned_file_name(release: &str) -> String {
	format!("alias_{}.go", release.replace('.', "_"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn go_versions_trim_to_release() {
		assert_eq!(normalize_go_version("go1.22.3").as_deref(), Some("go1.22"));
		assert_eq!(normalize_go_version("go1.23rc1").as_deref(), Some("go1.23"));
		assert_eq!(normalize_go_version("go1.21").as_deref(), Some("go1.21"));
		assert_eq!(normalize_go_version("devel +abc"), None);
	}

	#[test]
	fn versioned_file_names() {
		assert_eq!(versioned_file_name("go1.22"), "alias_go1_22.go");
	}

	#[test]
	fn missing_tools_are_reported() {
		let err = find_tool("aliaspkg-no-such-tool").unwrap_err();
		assert_eq!(err.to_string(), "aliaspkg-no-such-tool not found in PATH");
	}
}
