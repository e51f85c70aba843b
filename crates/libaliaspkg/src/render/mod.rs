//! Turns a [`Module`] into Go source.
//!
//! Rendering happens in three steps: the model is printed into a serializable view, the view is
//! fed to the `alias.go` template, and the result is piped through a [`SourceFormatter`].

/// Formatter implementations applied after templating.
pub mod format;
/// Process-wide template registry.
pub mod template;
mod view;

pub use self::format::{GoFmt, GoImports, SourceFormatter, Unformatted};

use tracing::debug;

use self::template::{ALIAS_TEMPLATE, render_template};
use self::view::ModuleView;
use crate::error::Result;
use crate::model::Module;

/// Renders forwarding packages.
#[derive(Debug)]
pub struct Renderer {
	/// Formatter run on the templated source.
	pub formatter: Box<dyn SourceFormatter>,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// A renderer that formats with `goimports`.
	pub fn new() -> Self {
		Self::with_formatter(GoImports::new())
	}

	/// A renderer that emits the template output as is.
	pub fn unformatted() -> Self {
		Self::with_formatter(Unformatted)
	}

	/// A renderer using a custom formatter.
	pub fn with_formatter(formatter: impl SourceFormatter + 'static) -> Self {
		Self {
			formatter: Box::new(formatter),
		}
	}

	/// Render `module` into formatted Go source.
	pub fn render(&self, module: &Module) -> Result<Vec<u8>> {
		let view = ModuleView::new(module)?;
		let source = render_template(ALIAS_TEMPLATE, &view)?;
		debug!(
			package = %module.path,
			bytes = source.len(),
			formatter = ?self.formatter,
			"rendered alias template"
		);
		self.formatter.format(source.as_bytes())
	}
}
