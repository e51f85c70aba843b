//! Test utilities shared across test modules.

use crate::model::Module;
use crate::render::Renderer;
use crate::syntax::{Decl, Package, TypeExpr, parse_file};

/// Parse a single-file package at `path`.
pub fn package(path: &str, source: &str) -> Package {
	Package::from_sources(path, &[("source.go", source)])
		.unwrap_or_else(|err| panic!("failed to parse test package: {err}"))
}

/// Parse `source` as the type of a function parameter.
pub fn param_type(source: &str) -> TypeExpr {
	let file = parse_file("param.go", &format!("package p\n\nfunc F(x {source}) {{}}\n"))
		.unwrap_or_else(|err| panic!("failed to parse `{source}`: {err}"));
	match file.decls.as_slice() {
		[Decl::Func(func)] => func.params.0[0].ty.clone(),
		other => panic!("unexpected declarations {other:?}"),
	}
}

/// Render `module` without an external formatter.
pub fn render_unformatted(module: &Module) -> String {
	let bytes = Renderer::unformatted()
		.render(module)
		.unwrap_or_else(|err| panic!("failed to render module: {err}"));
	String::from_utf8(bytes).expect("rendered output is UTF-8")
}
