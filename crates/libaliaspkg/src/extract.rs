//! Builds the forwarding [`Module`] from a parsed [`Package`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::error::{AliasError, Result};
use crate::model::{Alias, Const, Func, Module, Var};
use crate::policy::{DocScope, Policy};
use crate::printer::print_fields;
use crate::syntax::{
	Decl, Field, FieldList, FuncDecl, Package, SourceFile, TypeSpec, ValueKind, ValueSpec,
	is_exported,
};

/// Collect the exported, filter-accepted declarations of `package`.
///
/// Function signatures and type parameter lists are printed once here, so an unsupported type
/// expression fails the build with the declaration's name attached.
pub fn extract(package: &Package, policy: &Policy) -> Result<Module> {
	let Some(first) = package.files.first() else {
		return Err(AliasError::NoSyntaxFiles(package.path.clone()));
	};

	let package_docs: Vec<String> = package
		.files
		.iter()
		.flat_map(|file| file.doc.iter().cloned())
		.collect();

	let mut module = Module {
		name: first.package.clone(),
		path: package.path.clone(),
		docs: policy.docs_for(&package_docs, DocScope::Package),
		imports: external_imports(package),
		..Module::default()
	};

	for file in &package.files {
		let mut extractor = FileExtractor {
			module: &mut module,
			policy,
			internal: internal_qualifiers(file),
			named: named_imports(file),
		};
		for decl in &file.decls {
			extractor.decl(decl)?;
		}
	}

	debug!(
		package = %module.path,
		aliases = module.aliases.len(),
		funcs = module.funcs.len(),
		consts = module.consts.len(),
		vars = module.vars.len(),
		"extracted declarations"
	);
	Ok(module)
}

/// Whether an import path is only importable from within its own module tree.
pub fn is_internal_path(path: &str) -> bool {
	path.split('/').any(|segment| segment == "internal")
}

/// The aliased package itself plus every import that code outside its module may use.
fn external_imports(package: &Package) -> BTreeSet<String> {
	let mut imports = BTreeSet::from([package.path.clone()]);
	imports.extend(
		package
			.imports
			.iter()
			.filter(|path| path.as_str() != "C" && !is_internal_path(path))
			.cloned(),
	);
	imports
}

fn internal_qualifiers(file: &SourceFile) -> BTreeSet<String> {
	file.imports
		.iter()
		.filter(|spec| is_internal_path(&spec.path))
		.map(|spec| spec.qualifier().to_string())
		.collect()
}

/// Qualifier to path for imports bound under an explicit local name.
fn named_imports(file: &SourceFile) -> BTreeMap<String, String> {
	file.imports
		.iter()
		.filter_map(|spec| match spec.name.as_deref() {
			Some("_" | ".") | None => None,
			Some(name) => Some((name.to_string(), spec.path.clone())),
		})
		.collect()
}

/// Copy `params`, appending `_` to every name equal to `package`.
///
/// Forwarding calls are written as `package.Func(...)`; a parameter with the package's name would
/// shadow the qualifier.
pub fn rename_params(params: &FieldList, package: &str) -> FieldList {
	params
		.iter()
		.map(|field| Field {
			names: field
				.names
				.iter()
				.map(|name| {
					if name == package {
						format!("{name}_")
					} else {
						name.clone()
					}
				})
				.collect(),
			ty: field.ty.clone(),
		})
		.collect::<Vec<_>>()
		.into()
}

fn spec_docs<'a>(spec: &'a [String], group: &'a [String]) -> &'a [String] {
	if spec.is_empty() { group } else { spec }
}

struct FileExtractor<'a> {
	module: &'a mut Module,
	policy: &'a Policy,
	/// Qualifiers bound to internal imports in the current file.
	internal: BTreeSet<String>,
	/// Explicitly named imports of the current file.
	named: BTreeMap<String, String>,
}

impl FileExtractor<'_> {
	fn decl(&mut self, decl: &Decl) -> Result<()> {
		match decl {
			Decl::Type { doc, specs } => {
				for spec in specs {
					self.type_spec(spec, doc)?;
				}
			}
			Decl::Value { kind, doc, specs } => {
				for spec in specs {
					self.value_spec(*kind, spec, doc);
				}
			}
			Decl::Func(func) => self.func(func)?,
		}
		Ok(())
	}

	fn accepts(&self, name: &str) -> bool {
		if !is_exported(name) || !self.policy.filter.includes(name) {
			return false;
		}
		if self.module.contains(name) {
			warn!(name, "skipping duplicate declaration");
			return false;
		}
		true
	}

	fn docs(&self, lines: &[String]) -> Vec<String> {
		self.policy.docs_for(lines, DocScope::Decls)
	}

	fn type_spec(&mut self, spec: &TypeSpec, group_doc: &[String]) -> Result<()> {
		if !self.accepts(&spec.name) {
			return Ok(());
		}
		self.record_signature(&spec.name, [&spec.type_params])?;
		self.module.aliases.push(Alias {
			name: spec.name.clone(),
			docs: self.docs(spec_docs(&spec.doc, group_doc)),
			type_params: spec.type_params.clone(),
		});
		Ok(())
	}

	fn value_spec(&mut self, kind: ValueKind, spec: &ValueSpec, group_doc: &[String]) {
		for name in &spec.names {
			if !self.accepts(name) {
				continue;
			}
			let docs = self.docs(spec_docs(&spec.doc, group_doc));
			match kind {
				ValueKind::Const => self.module.consts.push(Const {
					name: name.clone(),
					docs,
				}),
				ValueKind::Var => self.module.vars.push(Var {
					name: name.clone(),
					docs,
				}),
			}
		}
	}

	fn func(&mut self, func: &FuncDecl) -> Result<()> {
		if func.receiver.is_some() || !self.accepts(&func.name) {
			return Ok(());
		}
		let entry = Func {
			name: func.name.clone(),
			docs: self.docs(&func.doc),
			type_params: func.type_params.clone(),
			params: rename_params(&func.params, &self.module.name),
			results: func.results.clone(),
		};
		self.record_signature(&entry.name, [&entry.type_params, &entry.params, &entry.results])?;
		self.module.funcs.push(entry);
		Ok(())
	}

	/// Print `lists` to validate them and merge the qualifiers they reference.
	fn record_signature<const N: usize>(&mut self, decl: &str, lists: [&FieldList; N]) -> Result<()> {
		for list in lists {
			let printed = print_fields(list).map_err(|err| err.in_decl(decl))?;
			for qualifier in printed.qualifiers {
				if self.internal.contains(&qualifier) {
					warn!(
						decl,
						qualifier = %qualifier,
						"signature references an internal package"
					);
				} else if let Some(path) = self.named.get(&qualifier) {
					self.module
						.import_names
						.insert(path.clone(), qualifier.clone());
				}
				self.module.qualifiers.insert(qualifier);
			}
		}
		Ok(())
	}
}
