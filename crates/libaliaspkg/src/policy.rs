//! Inclusion filtering and documentation retention.

use std::{fmt, str::FromStr};

use crate::error::AliasError;

/// How much documentation the generated package carries over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocsLevel {
	/// Drop every comment.
	#[default]
	None,
	/// Keep only the package doc comment.
	Package,
	/// Keep only declaration doc comments.
	Decls,
	/// Keep package and declaration docs.
	All,
}

/// Where a doc comment was attached in the source package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocScope {
	/// The package clause.
	Package,
	/// A type, function, constant or variable declaration.
	Decls,
}

impl DocsLevel {
	/// Whether comments in `scope` survive at this level.
	pub fn keeps(self, scope: DocScope) -> bool {
		matches!(
			(self, scope),
			(Self::All, _) | (Self::Package, DocScope::Package) | (Self::Decls, DocScope::Decls)
		)
	}

	/// The level's command-line spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Package => "package",
			Self::Decls => "decls",
			Self::All => "all",
		}
	}
}

impl FromStr for DocsLevel {
	type Err = AliasError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"" | "none" => Ok(Self::None),
			"package" => Ok(Self::Package),
			"decls" => Ok(Self::Decls),
			"all" => Ok(Self::All),
			other => Err(AliasError::InvalidDocsLevel(other.to_string())),
		}
	}
}

impl fmt::Display for DocsLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Name based include/ignore filter.
///
/// A non-empty include list wins outright; the ignore list only applies when nothing is
/// explicitly included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
	include: Vec<String>,
	ignore: Vec<String>,
}

impl Filter {
	/// Build a filter from explicit lists. Empty names are dropped.
	pub fn new<I, J, S, T>(include: I, ignore: J) -> Self
	where
		I: IntoIterator<Item = S>,
		J: IntoIterator<Item = T>,
		S: Into<String>,
		T: Into<String>,
	{
		Self {
			include: non_empty(include),
			ignore: non_empty(ignore),
		}
	}

	/// Build a filter from comma-delimited lists such as `Foo,Bar`.
	pub fn from_delimited(include: &str, ignore: &str) -> Self {
		Self::new(split_names(include), split_names(ignore))
	}

	/// Whether `name` passes the filter.
	pub fn includes(&self, name: &str) -> bool {
		if !self.include.is_empty() {
			return self.include.iter().any(|included| included == name);
		}
		!self.ignore.iter().any(|ignored| ignored == name)
	}

	/// Names that are explicitly included.
	pub fn include(&self) -> &[String] {
		&self.include
	}

	/// Names that are ignored when nothing is explicitly included.
	pub fn ignore(&self) -> &[String] {
		&self.ignore
	}
}

fn split_names(list: &str) -> impl Iterator<Item = &str> {
	list.split(',').map(str::trim)
}

fn non_empty<I, S>(names: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	names
		.into_iter()
		.map(Into::into)
		.filter(|name: &String| !name.is_empty())
		.collect()
}

/// Filter and documentation settings applied during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
	/// Which exported names are aliased.
	pub filter: Filter,
	/// Which comments are carried over.
	pub docs: DocsLevel,
}

impl Policy {
	/// The doc lines to keep for a declaration in `scope`.
	pub fn docs_for(&self, lines: &[String], scope: DocScope) -> Vec<String> {
		if self.docs.keeps(scope) {
			lines.to_vec()
		} else {
			Vec::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_filter_includes_everything() {
		let filter = Filter::default();
		assert!(filter.includes("Foo"));
		assert!(filter.includes(""));
	}

	#[test]
	fn ignore_list_excludes_members() {
		let filter = Filter::new(Vec::<String>::new(), ["Foo"]);
		assert!(!filter.includes("Foo"));
		assert!(filter.includes("Bar"));
	}

	#[test]
	fn include_list_wins_over_ignore() {
		let filter = Filter::new(["Foo"], ["Foo", "Bar"]);
		assert!(filter.includes("Foo"));
		assert!(!filter.includes("Bar"));
		assert!(!filter.includes("Baz"));
	}

	#[test]
	fn delimited_lists_drop_empty_entries() {
		let filter = Filter::from_delimited("", "Foo,, Bar ,");
		assert!(filter.include().is_empty());
		assert_eq!(filter.ignore(), ["Foo".to_string(), "Bar".to_string()]);

		// An include list of only blanks behaves like no include list.
		let blank = Filter::from_delimited(",", "");
		assert!(blank.includes("Anything"));
	}

	#[test]
	fn docs_levels_parse() {
		assert_eq!("none".parse::<DocsLevel>().unwrap(), DocsLevel::None);
		assert_eq!("".parse::<DocsLevel>().unwrap(), DocsLevel::None);
		assert_eq!("package".parse::<DocsLevel>().unwrap(), DocsLevel::Package);
		assert_eq!("decls".parse::<DocsLevel>().unwrap(), DocsLevel::Decls);
		assert_eq!("all".parse::<DocsLevel>().unwrap(), DocsLevel::All);

		let err = "everything".parse::<DocsLevel>().unwrap_err();
		assert!(err.to_string().contains("'everything'"));
		assert_eq!(DocsLevel::default(), DocsLevel::None);
	}

	#[test]
	fn docs_levels_gate_scopes() {
		let table = [
			(DocsLevel::None, false, false),
			(DocsLevel::Package, true, false),
			(DocsLevel::Decls, false, true),
			(DocsLevel::All, true, true),
		];
		for (level, package, decls) in table {
			assert_eq!(level.keeps(DocScope::Package), package, "{level}");
			assert_eq!(level.keeps(DocScope::Decls), decls, "{level}");
		}
	}

	#[test]
	fn policy_returns_lines_only_when_kept() {
		let lines = vec!["// Foo does things.".to_string()];
		let policy = Policy {
			docs: DocsLevel::Decls,
			..Policy::default()
		};
		assert_eq!(policy.docs_for(&lines, DocScope::Decls), lines);
		assert!(policy.docs_for(&lines, DocScope::Package).is_empty());
	}
}
