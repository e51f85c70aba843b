//! Serializable views of a [`Module`], with every piece of Go syntax already printed.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::model::{Alias, Func, Module};
use crate::printer::{print, print_fields};
use crate::syntax::{Field, FieldList};

/// Template input for one generated file.
#[derive(Debug, Serialize)]
pub struct ModuleView {
	/// Package name, also the qualifier of every forwarded reference.
	pub name: String,
	/// Go release for the `//go:build` line.
	pub build_constraint: Option<String>,
	/// Package doc comment block.
	pub docs: String,
	/// Import block entries.
	pub imports: Vec<ImportView>,
	/// Type aliases.
	pub aliases: Vec<AliasView>,
	/// Forwarding functions.
	pub funcs: Vec<FuncView>,
	/// Forwarded constants.
	pub consts: Vec<ValueView>,
	/// Forwarded variables.
	pub vars: Vec<ValueView>,
}

/// One import line.
#[derive(Debug, Serialize)]
pub struct ImportView {
	/// Explicit local name, if the signatures use one.
	pub name: Option<String>,
	/// Import path.
	pub path: String,
}

/// One `type Name = pkg.Name` line.
#[derive(Debug, Serialize)]
pub struct AliasView {
	/// Doc comment block, empty or ending in a newline.
	pub docs: String,
	/// Alias name, the same as the aliased type.
	pub name: String,
	/// `[T any, U comparable]` or empty.
	pub type_params: String,
	/// `[T, U]` or empty.
	pub type_args: String,
}

/// One forwarding function.
#[derive(Debug, Serialize)]
pub struct FuncView {
	/// Doc comment block, empty or ending in a newline.
	pub docs: String,
	/// Function name.
	pub name: String,
	/// Type parameter list with constraints, or empty.
	pub type_params: String,
	/// Explicit type arguments for the forwarded call, or empty.
	pub type_args: String,
	/// Printed parameter list, without parentheses.
	pub params: String,
	/// Result types with their leading space: empty, ` T`, or ` (A, B)`.
	pub results: String,
	/// Call arguments, variadic ones spread with `...`.
	pub args: Vec<String>,
	/// Whether the forwarding call's value is returned.
	pub returns: bool,
}

/// One forwarded constant or variable.
#[derive(Debug, Serialize)]
pub struct ValueView {
	/// Doc comment block, empty or ending in a newline.
	pub docs: String,
	/// Constant or variable name.
	pub name: String,
}

impl ModuleView {
	/// Print every declaration of `module`.
	pub fn new(module: &Module) -> Result<Self> {
		Ok(Self {
			name: module.name.clone(),
			build_constraint: module.go_build_version.clone(),
			docs: comment_block(&module.docs),
			imports: module
				.imports
				.iter()
				.map(|path| ImportView {
					name: module.import_names.get(path).cloned(),
					path: path.clone(),
				})
				.collect(),
			aliases: module.aliases.iter().map(AliasView::new).collect::<Result<_>>()?,
			funcs: module.funcs.iter().map(FuncView::new).collect::<Result<_>>()?,
			consts: module
				.consts
				.iter()
				.map(|value| ValueView {
					docs: comment_block(&value.docs),
					name: value.name.clone(),
				})
				.collect(),
			vars: module
				.vars
				.iter()
				.map(|value| ValueView {
					docs: comment_block(&value.docs),
					name: value.name.clone(),
				})
				.collect(),
		})
	}
}

impl AliasView {
	fn new(alias: &Alias) -> Result<Self> {
		let (type_params, type_args) = type_param_lists(&alias.type_params)?;
		Ok(Self {
			docs: comment_block(&alias.docs),
			name: alias.name.clone(),
			type_params,
			type_args,
		})
	}
}

impl FuncView {
	fn new(func: &Func) -> Result<Self> {
		let (type_params, type_args) = type_param_lists(&func.type_params)?;
		let params = forwarded_params(&func.params);
		let results = result_types(&func.results)?;
		Ok(Self {
			docs: comment_block(&func.docs),
			name: func.name.clone(),
			type_params,
			type_args,
			params: print_fields(&params)?.joined(),
			returns: !results.is_empty(),
			results: match results.as_slice() {
				[] => String::new(),
				[single] => format!(" {single}"),
				many => format!(" ({})", many.join(", ")),
			},
			args: call_args(&params),
		})
	}
}

/// Doc lines as a block where every line ends with a newline.
fn comment_block(lines: &[String]) -> String {
	lines.iter().map(|line| format!("{line}\n")).collect()
}

/// `([T any], [T])` for a type parameter list, or two empty strings.
fn type_param_lists(type_params: &FieldList) -> Result<(String, String)> {
	if type_params.is_empty() {
		return Ok((String::new(), String::new()));
	}
	let params = print_fields(type_params)?.joined();
	let args = type_params.names().collect::<Vec<_>>().join(", ");
	Ok((format!("[{params}]"), format!("[{args}]")))
}

/// Result types, one per declared name so `(a, b int)` becomes `int, int`.
fn result_types(results: &FieldList) -> Result<Vec<String>> {
	let mut types = Vec::new();
	for field in results {
		let ty = print(&field.ty)?.text;
		types.extend(std::iter::repeat_n(ty, field.names.len().max(1)));
	}
	Ok(types)
}

/// Name every parameter so it can be forwarded.
///
/// Blank `_` and unnamed parameters get `argN` names that clash with no declared name.
fn forwarded_params(params: &FieldList) -> FieldList {
	let taken: BTreeSet<&str> = params.names().collect();
	let mut counter = 0;
	let mut fresh = || loop {
		let candidate = format!("arg{counter}");
		counter += 1;
		if !taken.contains(candidate.as_str()) {
			break candidate;
		}
	};

	params
		.iter()
		.map(|field| {
			let names = if field.names.is_empty() {
				vec![fresh()]
			} else {
				field
					.names
					.iter()
					.map(|name| if name == "_" { fresh() } else { name.clone() })
					.collect()
			};
			Field::named(names, field.ty.clone())
		})
		.collect::<Vec<_>>()
		.into()
}

fn call_args(params: &FieldList) -> Vec<String> {
	params
		.iter()
		.flat_map(|field| {
			let spread = if field.is_variadic() { "..." } else { "" };
			field.names.iter().map(move |name| format!("{name}{spread}"))
		})
		.collect()
}
