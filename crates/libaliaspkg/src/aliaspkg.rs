use tracing::debug;

use crate::error::Result;
use crate::extract::extract;
use crate::loader::load_package;
use crate::model::Module;
use crate::policy::{DocsLevel, Filter, Policy};
use crate::render::Renderer;
use crate::syntax::Package;

/// AliasPkg generates a forwarding package for a Go package.
///
/// Every exported, free declaration of the source package is re-declared under the same name:
/// types become aliases, functions become thin wrappers calling the original, and constants and
/// variables are re-bound to the originals.
///
/// Loading goes through `go list`, so the Go toolchain must be installed. The default renderer
/// formats with `goimports`, which must be on `PATH` as well.
#[derive(Debug)]
pub struct AliasPkg {
	/// Filter and documentation settings.
	policy: Policy,

	/// Go release the output is constrained to.
	go_build_version: Option<String>,

	/// Renderer used to produce the output bytes.
	renderer: Renderer,
}

impl Default for AliasPkg {
	fn default() -> Self {
		Self::new()
	}
}

impl AliasPkg {
	/// Creates an AliasPkg that forwards everything, keeps no docs and formats with `goimports`.
	pub fn new() -> Self {
		Self {
			policy: Policy::default(),
			go_build_version: None,
			renderer: Renderer::new(),
		}
	}

	/// Selects which comments are carried over.
	pub fn with_docs(mut self, docs: DocsLevel) -> Self {
		self.policy.docs = docs;
		self
	}

	/// Restricts which exported names are forwarded.
	pub fn with_filter(mut self, filter: Filter) -> Self {
		self.policy.filter = filter;
		self
	}

	/// Constrains the output to a Go release such as `go1.22` with a `//go:build` line.
	pub fn with_go_build_version(mut self, version: Option<String>) -> Self {
		self.go_build_version = version;
		self
	}

	/// Replaces the renderer, e.g. with [`Renderer::unformatted`].
	pub fn with_renderer(mut self, renderer: Renderer) -> Self {
		self.renderer = renderer;
		self
	}

	/// The active policy.
	pub fn policy(&self) -> &Policy {
		&self.policy
	}

	/// Builds the forwarding model for an already loaded package.
	pub fn extract(&self, package: &Package) -> Result<Module> {
		let mut module = extract(package, &self.policy)?;
		module.go_build_version = self.go_build_version.clone();
		Ok(module)
	}

	/// Extracts and renders an already loaded package.
	pub fn render_package(&self, package: &Package) -> Result<Vec<u8>> {
		let module = self.extract(package)?;
		self.renderer.render(&module)
	}

	/// Loads `target` with the Go toolchain and renders its forwarding package.
	pub fn generate(&self, target: &str) -> Result<Vec<u8>> {
		let package = load_package(target)?;
		debug!(
			target,
			package = %package.path,
			files = package.files.len(),
			"loaded package"
		);
		self.render_package(&package)
	}
}
