//! libaliaspkg generates forwarding packages for Go packages.
//!
//! A forwarding package re-exports the exported top-level declarations of another package under
//! the same names. Types become aliases, functions become wrappers that call the original, and
//! constants and variables are re-bound to the originals. This lets a module expose a package
//! from an `internal/` tree, or re-home a package, without copying its code.
//!
//! The pipeline is load → extract → render. Packages are located with `go list`, parsed with
//! tree-sitter, reduced to an intermediate [`Module`], rendered through a handlebars template and
//! finally formatted with `goimports`.

/// Public API surface for driving the pipeline.
mod aliaspkg;
/// Error types exposed by the libaliaspkg crate.
mod error;
/// Declaration extraction.
pub mod extract;
/// Package loading through the Go toolchain.
pub mod loader;
/// Intermediate model between extraction and rendering.
pub mod model;
/// Include/ignore filtering and documentation levels.
pub mod policy;
/// Go type expression printing.
pub mod printer;
/// Template rendering and formatting.
pub mod render;
/// Go syntax tree and parser.
pub mod syntax;
/// Test utilities shared across test modules.
#[cfg(test)]
mod testutils;

pub use aliaspkg::AliasPkg;

pub use crate::error::{AliasError, Result};
pub use crate::loader::{go_build_version, load_package, versioned_file_name};
pub use crate::model::Module;
pub use crate::policy::{DocScope, DocsLevel, Filter, Policy};
pub use crate::render::{GoFmt, GoImports, Renderer, SourceFormatter, Unformatted};
pub use crate::syntax::Package;
