use handlebars::{Handlebars, handlebars_helper, no_escape};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::Result;

/// Name the alias file template is registered under.
pub const ALIAS_TEMPLATE: &str = "alias.go";

handlebars_helper!(join: |sep: str, items: array| {
	items
		.iter()
		.map(|item| match item.as_str() {
			Some(text) => text.to_string(),
			None => item.to_string(),
		})
		.collect::<Vec<_>>()
		.join(sep)
});

static REGISTRY: Lazy<Handlebars<'static>> = Lazy::new(|| {
	let mut registry = Handlebars::new();
	registry.register_escape_fn(no_escape);
	registry.register_helper("join", Box::new(join));
	registry
		.register_template_string(ALIAS_TEMPLATE, include_str!("templates/alias.go.hbs"))
		.expect("valid alias template");
	registry
});

/// Render a registered template with `data`.
pub fn render_template<T: Serialize>(name: &str, data: &T) -> Result<String> {
	Ok(REGISTRY.render(name, data)?)
}
