//! The intermediate model handed from the extractor to the renderer.

use std::collections::{BTreeMap, BTreeSet};

use crate::syntax::FieldList;

/// A forwarding package under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
	/// Package short name, used as the qualifier in forwarding declarations.
	pub name: String,
	/// Import path of the aliased package.
	pub path: String,
	/// Retained package doc comment lines.
	pub docs: Vec<String>,
	/// Import paths the generated file may reference, sorted.
	pub imports: BTreeSet<String>,
	/// Explicit local names of imports that signatures reference, keyed by import path.
	pub import_names: BTreeMap<String, String>,
	/// Qualifiers referenced by printed signatures and type parameters.
	pub qualifiers: BTreeSet<String>,
	/// Forwarded types.
	pub aliases: Vec<Alias>,
	/// Forwarded functions.
	pub funcs: Vec<Func>,
	/// Forwarded constants.
	pub consts: Vec<Const>,
	/// Forwarded variables.
	pub vars: Vec<Var>,
	/// Go release the output is constrained to, e.g. `go1.22`.
	pub go_build_version: Option<String>,
}

impl Module {
	/// Whether `name` is already forwarded under any kind.
	pub fn contains(&self, name: &str) -> bool {
		self.aliases.iter().any(|alias| alias.name == name)
			|| self.funcs.iter().any(|func| func.name == name)
			|| self.consts.iter().any(|value| value.name == name)
			|| self.vars.iter().any(|value| value.name == name)
	}

	/// Number of forwarded declarations across all kinds.
	pub fn len(&self) -> usize {
		self.aliases.len() + self.funcs.len() + self.consts.len() + self.vars.len()
	}

	/// Whether nothing is forwarded.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A forwarded type: `type Name[T any] = pkg.Name[T]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
	/// Type name.
	pub name: String,
	/// Retained doc comment lines.
	pub docs: Vec<String>,
	/// Type parameters; empty when the type is not generic.
	pub type_params: FieldList,
}

/// A forwarded function wrapping a call to the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Func {
	/// Function name.
	pub name: String,
	/// Retained doc comment lines.
	pub docs: Vec<String>,
	/// Type parameters; empty when the function is not generic.
	pub type_params: FieldList,
	/// Parameters, with names clashing with the package name already renamed.
	pub params: FieldList,
	/// Results.
	pub results: FieldList,
}

/// A forwarded constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
	/// Constant name.
	pub name: String,
	/// Retained doc comment lines.
	pub docs: Vec<String>,
}

/// A forwarded variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
	/// Variable name.
	pub name: String,
	/// Retained doc comment lines.
	pub docs: Vec<String>,
}
