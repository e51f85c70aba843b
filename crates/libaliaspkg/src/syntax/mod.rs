//! Go syntax tree covering the parts of a package that aliasing needs.
//!
//! Only top-level declarations and type expressions are modelled. Function bodies, constant
//! values and struct tags are never read.

pub use self::parse::parse_file;

mod generic_alias;
/// Tree-sitter based parser producing the types in this module.
pub mod parse;

/// A Go type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
	/// A bare identifier such as `int` or `Widget`.
	Ident(String),
	/// `*T`
	Pointer(Box<TypeExpr>),
	/// `pkg.Name`, referencing another package through its qualifier.
	Selector {
		/// Package qualifier.
		qualifier: String,
		/// Identifier inside the qualified package.
		name: String,
	},
	/// `[]T`
	Slice(Box<TypeExpr>),
	/// `[N]T`, with the length kept as written.
	Array {
		/// Length expression source text.
		len: String,
		/// Element type.
		elem: Box<TypeExpr>,
	},
	/// `map[K]V`
	Map {
		/// Key type.
		key: Box<TypeExpr>,
		/// Value type.
		value: Box<TypeExpr>,
	},
	/// `chan T`, `<-chan T` or `chan<- T`.
	Chan {
		/// Channel direction.
		dir: ChanDir,
		/// Element type.
		elem: Box<TypeExpr>,
	},
	/// `...T` in the final parameter position.
	Variadic(Box<TypeExpr>),
	/// `T[X]`, a generic instantiation with one argument kept as source text.
	Index {
		/// Generic type being instantiated.
		base: Box<TypeExpr>,
		/// Source text of the single index expression.
		index: String,
	},
	/// `T[A, B]`, a generic instantiation with several arguments.
	IndexList {
		/// Generic type being instantiated.
		base: Box<TypeExpr>,
		/// Type arguments.
		indices: Vec<TypeExpr>,
	},
	/// `func(params) (results)`
	Func {
		/// Parameters.
		params: FieldList,
		/// Results.
		results: FieldList,
	},
	/// `struct { ... }`
	Struct(FieldList),
	/// `interface { ... }`
	Interface {
		/// Whether the interface body declares nothing.
		empty: bool,
	},
	/// A grouping or modifier that carries no syntax of its own, e.g. `(T)`.
	Unary(Box<TypeExpr>),
	/// `~T` inside a type constraint.
	Approx(Box<TypeExpr>),
	/// `A | B` inside a type constraint.
	Union(Vec<TypeExpr>),
	/// Syntax the parser does not model.
	Unsupported {
		/// Grammar node kind.
		kind: String,
	},
}

impl TypeExpr {
	/// Shorthand for an identifier expression.
	pub fn ident(name: impl Into<String>) -> Self {
		Self::Ident(name.into())
	}

	/// Shorthand for a qualified identifier.
	pub fn selector(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
		Self::Selector {
			qualifier: qualifier.into(),
			name: name.into(),
		}
	}

	/// Human readable name of the expression variant.
	pub fn kind(&self) -> &str {
		match self {
			Self::Ident(_) => "identifier",
			Self::Pointer(_) => "pointer type",
			Self::Selector { .. } => "qualified identifier",
			Self::Slice(_) => "slice type",
			Self::Array { .. } => "array type",
			Self::Map { .. } => "map type",
			Self::Chan { .. } => "channel type",
			Self::Variadic(_) => "variadic type",
			Self::Index { .. } => "generic instantiation",
			Self::IndexList { .. } => "generic instantiation",
			Self::Func { .. } => "function type",
			Self::Struct(_) => "struct type",
			Self::Interface { .. } => "interface type",
			Self::Unary(_) => "parenthesized type",
			Self::Approx(_) => "approximation constraint",
			Self::Union(_) => "union constraint",
			Self::Unsupported { kind } => kind,
		}
	}
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChanDir {
	/// `chan T`
	Both,
	/// `<-chan T`
	Recv,
	/// `chan<- T`
	Send,
}

/// A group of names sharing one type, as in parameter and field lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	/// Declared names; empty for unnamed parameters and embedded fields.
	pub names: Vec<String>,
	/// Type shared by every name.
	pub ty: TypeExpr,
}

impl Field {
	/// Create a field with the given names.
	pub fn named<I, S>(names: I, ty: TypeExpr) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			names: names.into_iter().map(Into::into).collect(),
			ty,
		}
	}

	/// Create a field without names.
	pub fn unnamed(ty: TypeExpr) -> Self {
		Self {
			names: Vec::new(),
			ty,
		}
	}

	/// Whether the field's type is `...T`.
	pub fn is_variadic(&self) -> bool {
		matches!(self.ty, TypeExpr::Variadic(_))
	}
}

/// An ordered parameter, result, type parameter or struct field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList(pub Vec<Field>);

impl FieldList {
	/// An empty list.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Whether the list has no fields.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterate over the fields in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Field> {
		self.0.iter()
	}

	/// All declared names, in order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.iter().flat_map(|field| field.names.iter().map(String::as_str))
	}
}

impl From<Vec<Field>> for FieldList {
	fn from(fields: Vec<Field>) -> Self {
		Self(fields)
	}
}

impl<'a> IntoIterator for &'a FieldList {
	type Item = &'a Field;
	type IntoIter = std::slice::Iter<'a, Field>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// An `import` line of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
	/// Explicit local name, including `.` and `_`.
	pub name: Option<String>,
	/// Unquoted import path.
	pub path: String,
}

impl ImportSpec {
	/// The qualifier this import binds in the file scope.
	///
	/// Without an explicit name this is the last path element, which matches the package name for
	/// conventionally laid out modules.
	pub fn qualifier(&self) -> &str {
		match &self.name {
			Some(name) => name,
			None => self.path.rsplit('/').next().unwrap_or(&self.path),
		}
	}
}

/// Whether a constant/variable group was declared with `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// `const`
	Const,
	/// `var`
	Var,
}

/// One `name T` or `name = T` spec inside a `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
	/// Declared type name.
	pub name: String,
	/// Doc comment attached to the spec itself (grouped declarations).
	pub doc: Vec<String>,
	/// Type parameters of a generic declaration.
	pub type_params: FieldList,
	/// Whether the spec is an alias (`type A = B`).
	pub alias: bool,
}

/// A value spec binding one or more names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
	/// Bound names, in order.
	pub names: Vec<String>,
	/// Doc comment attached to the spec itself (grouped declarations).
	pub doc: Vec<String>,
}

/// A top-level function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
	/// Function name.
	pub name: String,
	/// Doc comment lines.
	pub doc: Vec<String>,
	/// Receiver list for methods.
	pub receiver: Option<FieldList>,
	/// Type parameters.
	pub type_params: FieldList,
	/// Parameters.
	pub params: FieldList,
	/// Results.
	pub results: FieldList,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
	/// `type ...`, possibly grouped.
	Type {
		/// Doc comment of the whole declaration.
		doc: Vec<String>,
		/// Specs in source order.
		specs: Vec<TypeSpec>,
	},
	/// `const ...` or `var ...`, possibly grouped.
	Value {
		/// Declaration keyword.
		kind: ValueKind,
		/// Doc comment of the whole declaration.
		doc: Vec<String>,
		/// Specs in source order.
		specs: Vec<ValueSpec>,
	},
	/// `func ...`
	Func(FuncDecl),
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
	/// File name the source was read from.
	pub name: String,
	/// Name from the package clause.
	pub package: String,
	/// Package doc comment lines.
	pub doc: Vec<String>,
	/// Import specs in source order.
	pub imports: Vec<ImportSpec>,
	/// Top-level declarations in source order.
	pub decls: Vec<Decl>,
}

/// A loaded package: its identity, imports and parsed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
	/// Package name from the package clause.
	pub name: String,
	/// Full import path.
	pub path: String,
	/// Import paths used by the package's files.
	pub imports: Vec<String>,
	/// Parsed source files.
	pub files: Vec<SourceFile>,
}

impl Package {
	/// Parse in-memory sources into a package with the given import path.
	///
	/// Imports are collected from the files' import specs.
	pub fn from_sources(path: &str, sources: &[(&str, &str)]) -> crate::Result<Self> {
		let files = sources
			.iter()
			.map(|(name, source)| parse_file(name, source))
			.collect::<crate::Result<Vec<_>>>()?;
		let mut imports: Vec<String> = Vec::new();
		for spec in files.iter().flat_map(|file| &file.imports) {
			if !imports.contains(&spec.path) {
				imports.push(spec.path.clone());
			}
		}
		Ok(Self::new(path, imports, files))
	}

	/// Assemble a package from already parsed files.
	pub fn new(path: &str, imports: Vec<String>, files: Vec<SourceFile>) -> Self {
		let name = files
			.first()
			.map(|file| file.package.clone())
			.unwrap_or_default();
		Self {
			name,
			path: path.to_string(),
			imports,
			files,
		}
	}
}

/// Whether `name` is visible outside its package.
pub fn is_exported(name: &str) -> bool {
	name.chars().next().is_some_and(char::is_uppercase)
}
