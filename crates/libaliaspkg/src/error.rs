use thiserror::Error;

/// Errors produced while loading, extracting or rendering an alias package.
#[derive(Debug, Error)]
pub enum AliasError {
	/// The Go toolchain could not load the requested package.
	#[error("failed to load package '{target}': {message}")]
	Load {
		/// Package pattern or path handed to the loader.
		target: String,
		/// Message reported by the toolchain.
		message: String,
	},
	/// The package resolved, but contains no Go source files.
	#[error("package '{0}' has no Go source files")]
	NoSyntaxFiles(String),
	/// A source file could not be parsed.
	#[error("failed to parse {file}: {message}")]
	Parse {
		/// File name as reported to the parser.
		file: String,
		/// Location and description of the first syntax error.
		message: String,
	},
	/// A type expression the printer does not know how to reproduce.
	#[error("unsupported type expression: {kind}")]
	UnsupportedExpr {
		/// Kind of the offending expression.
		kind: String,
	},
	/// An error raised while processing a named declaration.
	#[error("{decl}: {source}")]
	InDecl {
		/// Declaration being processed.
		decl: String,
		/// Underlying failure.
		#[source]
		source: Box<AliasError>,
	},
	/// Unknown documentation level.
	#[error("invalid docs level '{0}', expected one of: none, package, decls, all")]
	InvalidDocsLevel(String),
	/// A required external tool was not found on `PATH`.
	#[error("{0} not found in PATH")]
	ToolNotFound(String),
	/// Template rendering failed.
	#[error("template error: {0}")]
	Template(#[from] handlebars::RenderError),
	/// The formatter rejected the generated source.
	#[error("{0}")]
	Format(String),
	/// Filesystem or process I/O failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
	/// Failed to decode toolchain JSON output.
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl AliasError {
	/// Attach the name of the declaration being processed.
	pub fn in_decl(self, decl: impl Into<String>) -> Self {
		Self::InDecl {
			decl: decl.into(),
			source: Box::new(self),
		}
	}
}

/// Result type returned by libaliaspkg.
pub type Result<T> = std::result::Result<T, AliasError>;
