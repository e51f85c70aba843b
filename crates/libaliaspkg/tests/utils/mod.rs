//! Shared helpers for libaliaspkg integration tests.

use libaliaspkg::{AliasPkg, DocsLevel, Filter, Package, Renderer};

/// Render a single-file package with the given policy and no external formatter.
pub fn render(path: &str, source: &str, docs: DocsLevel, filter: Filter) -> String {
	let package = Package::from_sources(path, &[("source.go", source)])
		.unwrap_or_else(|err| panic!("failed to parse test package: {err}"));
	let bytes = AliasPkg::new()
		.with_docs(docs)
		.with_filter(filter)
		.with_renderer(Renderer::unformatted())
		.render_package(&package)
		.unwrap_or_else(|err| panic!("failed to render test package: {err}"));
	String::from_utf8(bytes).expect("rendered output is UTF-8")
}

/// Assert that every expected snippet appears in `output` and no forbidden one does.
pub fn assert_rendered(output: &str, expected: &[&str], forbidden: &[&str]) {
	for snippet in expected {
		assert!(
			output.contains(snippet),
			"expected output to contain:\n{snippet}\n\nOutput:\n{output}"
		);
	}
	for snippet in forbidden {
		assert!(
			!output.contains(snippet),
			"expected output not to contain:\n{snippet}\n\nOutput:\n{output}"
		);
	}
}

/// Generate one test per case. Each case renders `input` as package `path` and checks the
/// output for `contains` and `excludes` snippets.
macro_rules! gen_tests {
	($prefix:ident, {
		$(
			$name:ident {
				path: $path:expr,
				$(docs: $docs:expr,)?
				$(include: $include:expr,)?
				$(ignore: $ignore:expr,)?
				input: $input:expr,
				contains: [$($expected:expr),* $(,)?],
				excludes: [$($forbidden:expr),* $(,)?] $(,)?
			}
		)*
	}) => {
		mod $prefix {
			#[allow(unused_imports)]
			use super::*;

			$(
				#[test]
				fn $name() {
					#[allow(unused_mut, unused_assignments)]
					let mut docs = libaliaspkg::DocsLevel::None;
					$(docs = $docs;)?
					#[allow(unused_mut, unused_assignments)]
					let mut include = "";
					$(include = $include;)?
					#[allow(unused_mut, unused_assignments)]
					let mut ignore = "";
					$(ignore = $ignore;)?
					let filter = libaliaspkg::Filter::from_delimited(include, ignore);
					let output = crate::utils::render($path, $input, docs, filter);
					crate::utils::assert_rendered(&output, &[$($expected),*], &[$($forbidden),*]);
				}
			)*
		}
	};
}
