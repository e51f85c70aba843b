use std::{fs, path::PathBuf, process::Command};

use serde::Deserialize;
use tracing::debug;

use super::toolchain::find_tool;
use crate::error::{AliasError, Result};
use crate::syntax::{Package, parse_file};

/// The subset of `go list -json` output the loader reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListedPackage {
	dir: PathBuf,
	import_path: String,
	#[serde(default)]
	go_files: Vec<String>,
	#[serde(default)]
	cgo_files: Vec<String>,
	#[serde(default)]
	imports: Vec<String>,
	error: Option<ListError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListError {
	err: String,
}

/// Resolve `target` with `go list` and parse the package's Go files.
///
/// `target` is anything `go list` accepts: an import path, or a relative directory such as `.`.
/// When the pattern matches several packages only the first is loaded.
pub fn load_package(target: &str) -> Result<Package> {
	let load_error = |message: String| AliasError::Load {
		target: target.to_string(),
		message,
	};

	let output = Command::new(find_tool("go")?)
		.args(["list", "-json", target])
		.output()?;
	if !output.status.success() {
		return Err(load_error(
			String::from_utf8_lossy(&output.stderr).trim().to_string(),
		));
	}

	let listed = first_package(&output.stdout)?.ok_or_else(|| load_error("no packages".into()))?;
	if let Some(error) = listed.error {
		return Err(load_error(error.err));
	}
	debug!(
		package = %listed.import_path,
		dir = %listed.dir.display(),
		files = listed.go_files.len() + listed.cgo_files.len(),
		"listed package"
	);
	read_package(listed)
}

fn first_package(stdout: &[u8]) -> Result<Option<ListedPackage>> {
	let mut stream = serde_json::Deserializer::from_slice(stdout).into_iter::<ListedPackage>();
	Ok(stream.next().transpose()?)
}

fn read_package(listed: ListedPackage) -> Result<Package> {
	let names: Vec<&String> = listed.go_files.iter().chain(&listed.cgo_files).collect();
	if names.is_empty() {
		return Err(AliasError::NoSyntaxFiles(listed.import_path));
	}
	let files = names
		.into_iter()
		.map(|name| {
			let source = fs::read_to_string(listed.dir.join(name))?;
			parse_file(name, &source)
		})
		.collect::<Result<Vec<_>>>()?;
	Ok(Package::new(&listed.import_path, listed.imports, files))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn decodes_the_first_listed_package() {
		let stdout = br#"{
	"Dir": "/src/widget",
	"ImportPath": "example.com/widget",
	"Name": "widget",
	"GoFiles": ["widget.go"],
	"Imports": ["fmt", "example.com/widget/internal/paint"]
}
{
	"Dir": "/src/widget/other",
	"ImportPath": "example.com/widget/other"
}"#;
		let listed = first_package(stdout).unwrap().unwrap();
		assert_eq!(listed.import_path, "example.com/widget");
		assert_eq!(listed.go_files, vec!["widget.go".to_string()]);
		assert!(listed.cgo_files.is_empty());
		assert_eq!(listed.imports.len(), 2);
		assert!(listed.error.is_none());
	}

	#[test]
	fn empty_listing_has_no_package() {
		assert!(first_package(b"").unwrap().is_none());
	}

	#[test]
	fn package_errors_are_decoded() {
		let stdout = br#"{"Dir": "/src/broken", "ImportPath": "example.com/broken", "Error": {"Err": "no Go files"}}"#;
		let listed = first_package(stdout).unwrap().unwrap();
		assert_eq!(listed.error.unwrap().err, "no Go files");
	}

	#[test]
	fn reads_and_parses_listed_files() {
		let dir = TempDir::new().unwrap();
		fs::write(
			dir.path().join("widget.go"),
			"package widget\n\nfunc New() {}\n",
		)
		.unwrap();
		let listed = ListedPackage {
			dir: dir.path().to_path_buf(),
			import_path: "example.com/widget".into(),
			go_files: vec!["widget.go".into()],
			cgo_files: Vec::new(),
			imports: vec!["fmt".into()],
			error: None,
		};
		let package = read_package(listed).unwrap();
		assert_eq!(package.name, "widget");
		assert_eq!(package.path, "example.com/widget");
		assert_eq!(package.imports, vec!["fmt".to_string()]);
		assert_eq!(package.files.len(), 1);
	}

	#[test]
	fn packages_without_files_are_rejected() {
		let listed = ListedPackage {
			dir: PathBuf::from("/nonexistent"),
			import_path: "example.com/empty".into(),
			go_files: Vec::new(),
			cgo_files: Vec::new(),
			imports: Vec::new(),
			error: None,
		};
		let err = read_package(listed).unwrap_err();
		assert!(matches!(err, AliasError::NoSyntaxFiles(path) if path == "example.com/empty"));
	}
}
