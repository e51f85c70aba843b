use std::collections::BTreeMap;

use tree_sitter::{Node, Parser};

use super::generic_alias::GenericAliases;
use super::{
	ChanDir, Decl, Field, FieldList, FuncDecl, ImportSpec, SourceFile, TypeExpr, TypeSpec,
	ValueKind, ValueSpec,
};
use crate::error::{AliasError, Result};

/// Parse one Go source file.
///
/// Any syntax error fails the whole file: a partially understood file could silently drop
/// exported declarations.
pub fn parse_file(name: &str, source: &str) -> Result<SourceFile> {
	let parse_error = |message: String| AliasError::Parse {
		file: name.to_string(),
		message,
	};

	let mut parser = Parser::new();
	parser
		.set_language(&tree_sitter_go::LANGUAGE.into())
		.map_err(|err| parse_error(err.to_string()))?;

	let aliases = GenericAliases::scan(source);
	let tree = parser
		.parse(&aliases.source, None)
		.ok_or_else(|| parse_error("parser returned no tree".to_string()))?;

	let root = tree.root_node();
	if root.has_error() {
		return Err(parse_error(describe_error(root)));
	}

	let mut alias_params = BTreeMap::new();
	for (&name_end, list) in &aliases.params {
		let params = alias_type_params(&mut parser, list).ok_or_else(|| {
			let before = &source[..name_end];
			let row = before.matches('\n').count() + 1;
			let column = name_end - before.rfind('\n').map_or(0, |n| n + 1) + 1;
			parse_error(format!("{row}:{column}: invalid type parameters {list}"))
		})?;
		alias_params.insert(name_end, params);
	}

	let reader = Reader {
		src: aliases.source.as_bytes(),
		alias_params: &alias_params,
	};
	let mut file = SourceFile {
		name: name.to_string(),
		package: String::new(),
		doc: Vec::new(),
		imports: Vec::new(),
		decls: Vec::new(),
	};

	let mut cursor = root.walk();
	for node in root.named_children(&mut cursor) {
		match node.kind() {
			"package_clause" => {
				file.package = first_named(node)
					.map(|ident| reader.text(ident).to_string())
					.unwrap_or_default();
				file.doc = reader.doc_comments(node);
			}
			"import_declaration" => reader.imports(node, &mut file.imports),
			"type_declaration" => file.decls.push(reader.type_decl(node)),
			"const_declaration" => file.decls.push(reader.value_decl(node, ValueKind::Const)),
			"var_declaration" => file.decls.push(reader.value_decl(node, ValueKind::Var)),
			"function_declaration" | "method_declaration" => {
				file.decls.push(Decl::Func(reader.func_decl(node)))
			}
			_ => {}
		}
	}

	if file.package.is_empty() {
		return Err(parse_error("missing package clause".to_string()));
	}
	Ok(file)
}

/// Parse a generic alias parameter list, `[T comparable]`, through an equivalent type spec.
fn alias_type_params(parser: &mut Parser, list: &str) -> Option<FieldList> {
	let snippet = format!("package p\ntype P{list} struct{{}}\n");
	let tree = parser.parse(&snippet, None)?;
	let root = tree.root_node();
	if root.has_error() {
		return None;
	}
	let decl = named_children(root)
		.into_iter()
		.find(|node| node.kind() == "type_declaration")?;
	let params = first_named(decl)?.child_by_field_name("type_parameters")?;

	let empty = BTreeMap::new();
	let reader = Reader {
		src: snippet.as_bytes(),
		alias_params: &empty,
	};
	Some(reader.type_params(params))
}

/// Locate the first error or missing node and describe its position.
fn describe_error(root: Node) -> String {
	match first_error(root) {
		Some(node) => {
			let pos = node.start_position();
			let what = if node.is_missing() {
				format!("missing {}", node.kind())
			} else {
				"unexpected input".to_string()
			};
			format!("{}:{}: {what}", pos.row + 1, pos.column + 1)
		}
		None => "syntax error".to_string(),
	}
}

fn first_error(node: Node) -> Option<Node> {
	if node.is_error() || node.is_missing() {
		return Some(node);
	}
	let mut cursor = node.walk();
	let children: Vec<Node> = node.children(&mut cursor).collect();
	children
		.into_iter()
		.filter(|child| child.has_error())
		.find_map(first_error)
}

/// First named child that is not a comment.
fn first_named(node: Node) -> Option<Node> {
	let mut cursor = node.walk();
	let found = node
		.named_children(&mut cursor)
		.find(|child| child.kind() != "comment");
	found
}

/// Named children that are not comments.
fn named_children(node: Node) -> Vec<Node> {
	let mut cursor = node.walk();
	node.named_children(&mut cursor)
		.filter(|child| child.kind() != "comment")
		.collect()
}

/// Converts tree-sitter nodes of one file into syntax tree values.
struct Reader<'a> {
	src: &'a [u8],
	/// Type parameters of generic aliases, keyed by the end byte of the alias name.
	alias_params: &'a BTreeMap<usize, FieldList>,
}

impl<'a> Reader<'a> {
	fn text(&self, node: Node) -> &'a str {
		node.utf8_text(self.src).unwrap_or_default()
	}

	fn field_text(&self, node: Node, field: &str) -> String {
		node.child_by_field_name(field)
			.map(|child| self.text(child).to_string())
			.unwrap_or_default()
	}

	fn field_names(&self, node: Node) -> Vec<String> {
		let mut cursor = node.walk();
		node.children_by_field_name("name", &mut cursor)
			.filter(|name| name.is_named())
			.map(|name| self.text(name).to_string())
			.collect()
	}

	/// Comment lines directly above `node`, without blank lines in between.
	///
	/// A comment that trails code on the same line belongs to that code and ends the block.
	fn doc_comments(&self, node: Node) -> Vec<String> {
		let mut lines = Vec::new();
		let mut expected_row = node.start_position().row;
		let mut current = node.prev_named_sibling();

		while let Some(sibling) = current {
			if sibling.kind() != "comment" || sibling.end_position().row + 1 != expected_row {
				break;
			}
			let trailing = sibling
				.prev_named_sibling()
				.is_some_and(|prev| prev.end_position().row == sibling.start_position().row);
			if trailing {
				break;
			}
			lines.push(self.text(sibling).to_string());
			expected_row = sibling.start_position().row;
			current = sibling.prev_named_sibling();
		}

		lines.reverse();
		lines
	}

	fn imports(&self, node: Node, out: &mut Vec<ImportSpec>) {
		for child in named_children(node) {
			match child.kind() {
				"import_spec" => {
					let path = self.field_text(child, "path");
					out.push(ImportSpec {
						name: child
							.child_by_field_name("name")
							.map(|name| self.text(name).to_string()),
						path: path.trim_matches(|c| c == '"' || c == '`').to_string(),
					});
				}
				"import_spec_list" => self.imports(child, out),
				_ => {}
			}
		}
	}

	fn type_decl(&self, node: Node) -> Decl {
		let specs = named_children(node)
			.into_iter()
			.filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
			.map(|spec| {
				let alias = spec.kind() == "type_alias";
				let type_params = if alias {
					spec.child_by_field_name("name")
						.and_then(|name| self.alias_params.get(&name.end_byte()))
						.cloned()
						.unwrap_or_default()
				} else {
					spec.child_by_field_name("type_parameters")
						.map(|params| self.type_params(params))
						.unwrap_or_default()
				};
				TypeSpec {
					name: self.field_text(spec, "name"),
					doc: self.doc_comments(spec),
					type_params,
					alias,
				}
			})
			.collect();

		Decl::Type {
			doc: self.doc_comments(node),
			specs,
		}
	}

	fn value_decl(&self, node: Node, kind: ValueKind) -> Decl {
		let mut specs = Vec::new();
		self.value_specs(node, &mut specs);
		Decl::Value {
			kind,
			doc: self.doc_comments(node),
			specs,
		}
	}

	fn value_specs(&self, node: Node, out: &mut Vec<ValueSpec>) {
		for child in named_children(node) {
			match child.kind() {
				"const_spec" | "var_spec" => out.push(ValueSpec {
					names: self.field_names(child),
					doc: self.doc_comments(child),
				}),
				"var_spec_list" => self.value_specs(child, out),
				_ => {}
			}
		}
	}

	fn func_decl(&self, node: Node) -> FuncDecl {
		FuncDecl {
			name: self.field_text(node, "name"),
			doc: self.doc_comments(node),
			receiver: node
				.child_by_field_name("receiver")
				.map(|receiver| self.params(receiver)),
			type_params: node
				.child_by_field_name("type_parameters")
				.map(|params| self.type_params(params))
				.unwrap_or_default(),
			params: node
				.child_by_field_name("parameters")
				.map(|params| self.params(params))
				.unwrap_or_default(),
			results: node
				.child_by_field_name("result")
				.map(|result| self.results(result))
				.unwrap_or_default(),
		}
	}

	fn params(&self, list: Node) -> FieldList {
		named_children(list)
			.into_iter()
			.filter_map(|param| match param.kind() {
				"parameter_declaration" => {
					Some(Field::named(self.field_names(param), self.required(param, "type")))
				}
				"variadic_parameter_declaration" => Some(Field::named(
					self.field_names(param),
					TypeExpr::Variadic(Box::new(self.required(param, "type"))),
				)),
				_ => None,
			})
			.collect::<Vec<_>>()
			.into()
	}

	fn results(&self, result: Node) -> FieldList {
		if result.kind() == "parameter_list" {
			self.params(result)
		} else {
			FieldList(vec![Field::unnamed(self.type_expr(result))])
		}
	}

	fn type_params(&self, list: Node) -> FieldList {
		named_children(list)
			.into_iter()
			.filter(|param| {
				matches!(
					param.kind(),
					"type_parameter_declaration" | "parameter_declaration"
				)
			})
			.map(|param| {
				let constraint = param
					.child_by_field_name("type")
					.map(|ty| self.constraint(ty))
					.unwrap_or_else(|| unsupported(param, "type"));
				Field::named(self.field_names(param), constraint)
			})
			.collect::<Vec<_>>()
			.into()
	}

	/// A `type_constraint` or `type_elem`: one term, or a union of terms.
	fn constraint(&self, node: Node) -> TypeExpr {
		if !matches!(node.kind(), "type_constraint" | "type_elem") {
			return self.type_expr(node);
		}
		let mut terms: Vec<TypeExpr> = named_children(node)
			.into_iter()
			.map(|term| self.type_expr(term))
			.collect();
		if terms.len() == 1 {
			terms.remove(0)
		} else {
			TypeExpr::Union(terms)
		}
	}

	fn required(&self, node: Node, field: &str) -> TypeExpr {
		node.child_by_field_name(field)
			.map(|child| self.type_expr(child))
			.unwrap_or_else(|| unsupported(node, field))
	}

	fn first_type(&self, node: Node) -> TypeExpr {
		first_named(node)
			.map(|child| self.type_expr(child))
			.unwrap_or_else(|| unsupported(node, "operand"))
	}

	fn type_expr(&self, node: Node) -> TypeExpr {
		match node.kind() {
			"type_identifier" | "identifier" => TypeExpr::Ident(self.text(node).to_string()),
			"qualified_type" => TypeExpr::Selector {
				qualifier: self.field_text(node, "package"),
				name: self.field_text(node, "name"),
			},
			"pointer_type" => TypeExpr::Pointer(Box::new(self.first_type(node))),
			"parenthesized_type" => TypeExpr::Unary(Box::new(self.first_type(node))),
			"negated_type" => TypeExpr::Approx(Box::new(self.first_type(node))),
			"slice_type" => TypeExpr::Slice(Box::new(self.required(node, "element"))),
			"array_type" => TypeExpr::Array {
				len: self.field_text(node, "length"),
				elem: Box::new(self.required(node, "element")),
			},
			"map_type" => TypeExpr::Map {
				key: Box::new(self.required(node, "key")),
				value: Box::new(self.required(node, "value")),
			},
			"channel_type" => TypeExpr::Chan {
				dir: channel_dir(node),
				elem: Box::new(self.required(node, "value")),
			},
			"function_type" => TypeExpr::Func {
				params: node
					.child_by_field_name("parameters")
					.map(|params| self.params(params))
					.unwrap_or_default(),
				results: node
					.child_by_field_name("result")
					.map(|result| self.results(result))
					.unwrap_or_default(),
			},
			"generic_type" => self.generic_type(node),
			"struct_type" => TypeExpr::Struct(self.struct_fields(node)),
			"interface_type" => TypeExpr::Interface {
				empty: named_children(node).is_empty(),
			},
			"type_constraint" | "type_elem" => self.constraint(node),
			other => TypeExpr::Unsupported {
				kind: other.replace('_', " "),
			},
		}
	}

	fn generic_type(&self, node: Node) -> TypeExpr {
		let base = Box::new(self.required(node, "type"));
		let Some(args) = node.child_by_field_name("type_arguments") else {
			return unsupported(node, "type_arguments");
		};
		let terms = named_children(args);
		match terms.as_slice() {
			[single] => TypeExpr::Index {
				base,
				index: self.text(*single).to_string(),
			},
			_ => TypeExpr::IndexList {
				base,
				indices: terms.iter().map(|term| self.constraint(*term)).collect(),
			},
		}
	}

	fn struct_fields(&self, node: Node) -> FieldList {
		let Some(body) = first_named(node) else {
			return FieldList::new();
		};
		named_children(body)
			.into_iter()
			.filter(|field| field.kind() == "field_declaration")
			.map(|field| {
				let ty = self.required(field, "type");
				let names = self.field_names(field);
				let mut cursor = field.walk();
				let embedded_pointer =
					names.is_empty() && field.children(&mut cursor).any(|c| c.kind() == "*");
				if embedded_pointer {
					Field::unnamed(TypeExpr::Pointer(Box::new(ty)))
				} else {
					Field::named(names, ty)
				}
			})
			.collect::<Vec<_>>()
			.into()
	}
}

fn channel_dir(node: Node) -> ChanDir {
	let mut cursor = node.walk();
	let tokens: Vec<&str> = node
		.children(&mut cursor)
		.filter(|child| !child.is_named())
		.map(|child| child.kind())
		.collect();
	match tokens.as_slice() {
		["<-", "chan", ..] => ChanDir::Recv,
		["chan", "<-", ..] => ChanDir::Send,
		_ => ChanDir::Both,
	}
}

fn unsupported(node: Node, field: &str) -> TypeExpr {
	TypeExpr::Unsupported {
		kind: format!("{} without {field}", node.kind().replace('_', " ")),
	}
}
