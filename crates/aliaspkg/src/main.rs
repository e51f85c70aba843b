//! CLI entrypoint.

use std::{
	env, fs,
	io::{self, Write},
	path::{Path, PathBuf},
	process,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use libaliaspkg::{
	AliasPkg, DocsLevel, Filter, GoImports, Renderer, go_build_version, loader::find_tool,
	versioned_file_name,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Documentation levels accepted by `--docs`.
enum DocsArg {
	/// Don't include docs.
	None,
	/// Package-level docs.
	Package,
	/// Docs for functions, types, constants and variables.
	Decls,
	/// All available docs.
	All,
}

impl From<DocsArg> for DocsLevel {
	fn from(arg: DocsArg) -> Self {
		match arg {
			DocsArg::None => Self::None,
			DocsArg::Package => Self::Package,
			DocsArg::Decls => Self::Decls,
			DocsArg::All => Self::All,
		}
	}
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the aliaspkg CLI.
struct Cli {
	/// Package to alias: an import path or a directory. Defaults to $GOPACKAGE under go:generate.
	#[arg(env = "GOPACKAGE")]
	package: Option<String>,

	/// Documentation to carry over
	#[arg(long, value_enum, default_value = "none")]
	docs: DocsArg,

	/// Comma-delimited identifiers to include (overrides --ignore)
	#[arg(long, value_name = "NAMES", default_value = "")]
	include: String,

	/// Comma-delimited identifiers to ignore
	#[arg(long, value_name = "NAMES", default_value = "")]
	ignore: String,

	/// Output file. Defaults to $(pwd)/alias.go when $GOFILE is set
	#[arg(long, value_name = "PATH")]
	file: Option<PathBuf>,

	/// Write the generated package to stdout instead of a file
	#[arg(long, default_value_t = false)]
	stdout: bool,

	/// Constrain the output to the active Go release and name the file after it
	#[arg(long, default_value_t = false)]
	gover: bool,

	/// Skip goimports and emit the template output unformatted
	#[arg(long, default_value_t = false)]
	raw: bool,

	/// Enable debug logging on stderr
	#[arg(short = 'v', long, default_value_t = false)]
	verbose: bool,
}

/// Where the generated source goes.
#[derive(Debug, PartialEq, Eq)]
enum Output {
	Stdout,
	File(PathBuf),
}

impl Output {
	/// Directory goimports resolves imports against.
	fn srcdir(&self, cwd: &Path) -> PathBuf {
		match self {
			Self::File(path) => path
				.parent()
				.filter(|parent| !parent.as_os_str().is_empty())
				.map(Path::to_path_buf)
				.unwrap_or_else(|| cwd.to_path_buf()),
			Self::Stdout => cwd.to_path_buf(),
		}
	}
}

/// Pick the output sink: `--stdout`, then `--file`, then the go:generate default.
fn resolve_output(cli: &Cli, gofile: bool, cwd: &Path, release: Option<&str>) -> Result<Output> {
	if cli.stdout {
		return Ok(Output::Stdout);
	}
	if let Some(file) = &cli.file {
		return Ok(Output::File(file.clone()));
	}
	if !gofile {
		bail!("must provide output file or --stdout");
	}
	let name = release
		.map(versioned_file_name)
		.unwrap_or_else(|| "alias.go".to_string());
	Ok(Output::File(cwd.join(name)))
}

fn write_output(output: &Output, data: &[u8]) -> Result<()> {
	match output {
		Output::Stdout => {
			let mut stdout = io::stdout().lock();
			stdout.write_all(data)?;
			stdout.flush()?;
		}
		Output::File(path) => {
			fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?
		}
	}
	Ok(())
}

/// Ensure goimports is available before doing any work.
fn check_goimports() -> Result<(), String> {
	find_tool("goimports").map(|_| ()).map_err(|_| {
		"aliaspkg formats its output with goimports, which was not found in PATH.\n\
		 Run: go install golang.org/x/tools/cmd/goimports@latest\n\
		 or pass --raw to skip formatting."
			.to_string()
	})
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.init();
}

/// Generate the forwarding package and write it to the selected sink.
fn run_cmdline(cli: &Cli) -> Result<()> {
	let target = cli
		.package
		.as_deref()
		.filter(|package| !package.is_empty())
		.ok_or_else(|| anyhow!("no package given and $GOPACKAGE is not set"))?;

	let release = if cli.gover {
		Some(go_build_version().context("failed to determine the Go build version")?)
	} else {
		None
	};

	let cwd = env::current_dir()?;
	let output = resolve_output(
		cli,
		env::var_os("GOFILE").is_some(),
		&cwd,
		release.as_deref(),
	)?;

	let renderer = if cli.raw {
		Renderer::unformatted()
	} else {
		Renderer::with_formatter(GoImports::new().with_srcdir(output.srcdir(&cwd)))
	};

	let aliaspkg = AliasPkg::new()
		.with_docs(cli.docs.into())
		.with_filter(Filter::from_delimited(&cli.include, &cli.ignore))
		.with_go_build_version(release)
		.with_renderer(renderer);

	let data = aliaspkg
		.generate(target)
		.with_context(|| format!("failed to generate aliases for {target}"))?;
	write_output(&output, &data)
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if !cli.raw {
		if let Err(e) = check_goimports() {
			eprintln!("{} {e}", "error:".red().bold());
			process::exit(1);
		}
	}

	if let Err(e) = run_cmdline(&cli) {
		eprintln!("{} {e:#}", "error:".red().bold());
		process::exit(1);
	}
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	fn parse(args: &[&str]) -> Cli {
		let mut argv = vec!["aliaspkg"];
		argv.extend_from_slice(args);
		Cli::try_parse_from(argv).unwrap()
	}

	#[test]
	fn parses_flags() {
		let cli = parse(&[
			"--docs",
			"decls",
			"--include",
			"Foo,Bar",
			"--ignore",
			"Baz",
			"--stdout",
			"example.com/widget",
		]);
		assert_eq!(cli.package.as_deref(), Some("example.com/widget"));
		assert_eq!(cli.docs, DocsArg::Decls);
		assert_eq!(DocsLevel::from(cli.docs), DocsLevel::Decls);
		assert_eq!(cli.include, "Foo,Bar");
		assert_eq!(cli.ignore, "Baz");
		assert!(cli.stdout);
		assert!(!cli.raw);
	}

	#[test]
	fn docs_default_to_none() {
		let cli = parse(&["--stdout", "example.com/widget"]);
		assert_eq!(DocsLevel::from(cli.docs), DocsLevel::None);
	}

	#[test]
	fn rejects_unknown_docs_level() {
		assert!(Cli::try_parse_from(["aliaspkg", "--docs", "everything", "pkg"]).is_err());
	}

	#[test]
	fn stdout_wins_over_file() {
		let cli = parse(&["--stdout", "--file", "out.go", "pkg"]);
		let output = resolve_output(&cli, true, Path::new("/work"), None).unwrap();
		assert_eq!(output, Output::Stdout);
	}

	#[test]
	fn explicit_file_is_used() {
		let cli = parse(&["--file", "gen/alias.go", "pkg"]);
		let output = resolve_output(&cli, false, Path::new("/work"), None).unwrap();
		assert_eq!(output, Output::File(PathBuf::from("gen/alias.go")));
		assert_eq!(output.srcdir(Path::new("/work")), PathBuf::from("gen"));
	}

	#[test]
	fn go_generate_defaults_to_alias_go() {
		let cli = parse(&["pkg"]);
		let output = resolve_output(&cli, true, Path::new("/work"), None).unwrap();
		assert_eq!(output, Output::File(PathBuf::from("/work/alias.go")));
	}

	#[test]
	fn gover_names_the_file_after_the_release() {
		let cli = parse(&["--gover", "pkg"]);
		let output = resolve_output(&cli, true, Path::new("/work"), Some("go1.22")).unwrap();
		assert_eq!(output, Output::File(PathBuf::from("/work/alias_go1_22.go")));
	}

	#[test]
	fn missing_output_is_an_error() {
		let cli = parse(&["pkg"]);
		let err = resolve_output(&cli, false, Path::new("/work"), None).unwrap_err();
		assert_eq!(err.to_string(), "must provide output file or --stdout");
	}

	#[test]
	fn writes_output_files() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("alias.go");
		write_output(&Output::File(path.clone()), b"package widget\n").unwrap();
		assert_eq!(fs::read_to_string(path).unwrap(), "package widget\n");
	}

	#[test]
	fn unwritable_output_fails() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("missing").join("alias.go");
		let err = write_output(&Output::File(path), b"package widget\n").unwrap_err();
		assert!(err.to_string().starts_with("failed to write"));
	}
}
