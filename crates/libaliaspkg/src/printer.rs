//! Reconstructs Go type syntax from [`TypeExpr`] trees.
//!
//! Every call returns the printed text together with the package qualifiers the expression
//! references, so callers can merge qualifier sets across signatures without shared state.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AliasError, Result};
use crate::syntax::{ChanDir, FieldList, TypeExpr};

/// A qualified identifier inside raw type argument text, capturing the qualifier.
static QUALIFIED: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\b([\p{L}_][\p{L}\p{N}_]*)\.[\p{L}_]").expect("valid qualified identifier pattern")
});

/// A printed type expression and the qualifiers it references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Printed {
	/// Go source text.
	pub text: String,
	/// Package qualifiers used by selector expressions, e.g. `http` in `http.Handler`.
	pub qualifiers: BTreeSet<String>,
}

/// A printed field list: one entry per field, plus the qualifiers of all entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintedFields {
	/// Per-field source text, `a, b T` or `T`.
	pub entries: Vec<String>,
	/// Union of qualifiers across every entry.
	pub qualifiers: BTreeSet<String>,
}

impl PrintedFields {
	/// Entries joined the way Go writes a parameter list.
	pub fn joined(&self) -> String {
		self.entries.join(", ")
	}
}

/// Print a type expression as Go source.
///
/// Fails with [`AliasError::UnsupportedExpr`] for non-empty struct types, non-empty interfaces and
/// any syntax the parser did not model.
pub fn print(expr: &TypeExpr) -> Result<Printed> {
	let mut qualifiers = BTreeSet::new();
	let text = print_into(expr, &mut qualifiers)?;
	Ok(Printed { text, qualifiers })
}

/// Print each field of a list as `names type`, or just `type` when unnamed.
pub fn print_fields(list: &FieldList) -> Result<PrintedFields> {
	let mut qualifiers = BTreeSet::new();
	let entries = list
		.iter()
		.map(|field| {
			let ty = print_into(&field.ty, &mut qualifiers)?;
			Ok(if field.names.is_empty() {
				ty
			} else {
				format!("{} {ty}", field.names.join(", "))
			})
		})
		.collect::<Result<Vec<_>>>()?;
	Ok(PrintedFields {
		entries,
		qualifiers,
	})
}

fn print_into(expr: &TypeExpr, qualifiers: &mut BTreeSet<String>) -> Result<String> {
	Ok(match expr {
		TypeExpr::Ident(name) => name.clone(),
		TypeExpr::Pointer(inner) => format!("*{}", print_into(inner, qualifiers)?),
		TypeExpr::Selector { qualifier, name } => {
			qualifiers.insert(qualifier.clone());
			format!("{qualifier}.{name}")
		}
		TypeExpr::Slice(elem) => format!("[]{}", print_into(elem, qualifiers)?),
		TypeExpr::Array { len, elem } => format!("[{len}]{}", print_into(elem, qualifiers)?),
		TypeExpr::Map { key, value } => format!(
			"map[{}]{}",
			print_into(key, qualifiers)?,
			print_into(value, qualifiers)?
		),
		TypeExpr::Chan { dir, elem } => {
			let elem = print_into(elem, qualifiers)?;
			match dir {
				ChanDir::Both => format!("chan {elem}"),
				ChanDir::Recv => format!("<-chan {elem}"),
				ChanDir::Send => format!("chan<- {elem}"),
			}
		}
		TypeExpr::Variadic(elem) => format!("...{}", print_into(elem, qualifiers)?),
		TypeExpr::Index { base, index } => {
			qualifiers.extend(
				QUALIFIED
					.captures_iter(index)
					.map(|captures| captures[1].to_string()),
			);
			format!("{}[{index}]", print_into(base, qualifiers)?)
		}
		TypeExpr::IndexList { base, indices } => {
			let base = print_into(base, qualifiers)?;
			let indices = indices
				.iter()
				.map(|index| print_into(index, qualifiers))
				.collect::<Result<Vec<_>>>()?;
			format!("{base}[{}]", indices.join(", "))
		}
		TypeExpr::Func { params, results } => {
			let params = print_fields(params)?;
			let results = print_fields(results)?;
			qualifiers.extend(params.qualifiers.iter().cloned());
			qualifiers.extend(results.qualifiers.iter().cloned());
			format!("func({}) ({})", params.joined(), results.joined())
		}
		TypeExpr::Unary(inner) => print_into(inner, qualifiers)?,
		TypeExpr::Approx(inner) => format!("~{}", print_into(inner, qualifiers)?),
		TypeExpr::Union(terms) => terms
			.iter()
			.map(|term| print_into(term, qualifiers))
			.collect::<Result<Vec<_>>>()?
			.join(" | "),
		TypeExpr::Interface { empty: true } => "interface{}".to_string(),
		TypeExpr::Struct(fields) if fields.is_empty() => "struct{}".to_string(),
		TypeExpr::Interface { empty: false } | TypeExpr::Struct(_) | TypeExpr::Unsupported { .. } => {
			return Err(AliasError::UnsupportedExpr {
				kind: expr.kind().to_string(),
			});
		}
	})
}
