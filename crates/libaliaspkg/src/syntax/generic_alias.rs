//! Generic alias specs (`type Set[T comparable] = map[T]struct{}`).
//!
//! The Go grammar only knows non-generic aliases, so the type parameter list of each generic alias
//! is blanked out with spaces before parsing. Byte offsets and line numbers stay unchanged, and
//! the blanked lists are kept by the offset where the alias name ends.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static TYPE_KEYWORD: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\btype\b").expect("valid type keyword pattern"));

/// Source with generic alias parameter lists blanked out.
#[derive(Debug, Default)]
pub(super) struct GenericAliases {
	/// Source text handed to the grammar.
	pub source: String,
	/// Bracketed parameter lists, `[T comparable]`, keyed by the end byte of the alias name.
	pub params: BTreeMap<usize, String>,
}

impl GenericAliases {
	pub fn scan(source: &str) -> Self {
		let masked = mask_literals(source.as_bytes());
		let mut blanked = source.as_bytes().to_vec();
		let mut params = BTreeMap::new();

		for keyword in TYPE_KEYWORD.find_iter(&masked) {
			let mut specs = Vec::new();
			let start = skip_blanks(masked.as_bytes(), keyword.end(), true);
			if masked.as_bytes().get(start) == Some(&b'(') {
				group_specs(masked.as_bytes(), start + 1, &mut specs);
			} else {
				specs.push(start);
			}
			for spec in specs {
				let Some((name_end, open, close)) = alias_params_at(masked.as_bytes(), spec) else {
					continue;
				};
				params.insert(name_end, source[open..=close].to_string());
				for byte in &mut blanked[open..=close] {
					if *byte != b'\n' {
						*byte = b' ';
					}
				}
			}
		}

		if params.is_empty() {
			return Self {
				source: source.to_string(),
				params,
			};
		}
		Self {
			// Whole bracketed runs were replaced, so no character is split.
			source: String::from_utf8_lossy(&blanked).into_owned(),
			params,
		}
	}
}

/// Replace comment and literal contents with spaces, keeping newlines and byte offsets.
fn mask_literals(src: &[u8]) -> String {
	let mut out = src.to_vec();
	let mut i = 0;
	let blank = |out: &mut Vec<u8>, from: usize, to: usize| {
		for byte in &mut out[from..to] {
			if *byte != b'\n' {
				*byte = b' ';
			}
		}
	};

	while i < src.len() {
		let rest = &src[i..];
		let end = if rest.starts_with(b"//") {
			rest.iter().position(|&b| b == b'\n').map_or(src.len(), |n| i + n)
		} else if rest.starts_with(b"/*") {
			find(src, i + 2, b"*/").map_or(src.len(), |n| n + 2)
		} else if rest[0] == b'`' {
			src[i + 1..]
				.iter()
				.position(|&b| b == b'`')
				.map_or(src.len(), |n| i + n + 2)
		} else if rest[0] == b'"' || rest[0] == b'\'' {
			quoted_end(src, i)
		} else {
			i += 1;
			continue;
		};
		blank(&mut out, i, end);
		i = end;
	}

	// Every non-ASCII byte outside literals is kept, and blanked bytes are ASCII spaces.
	String::from_utf8_lossy(&out).into_owned()
}

fn find(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
	src.get(from..)?
		.windows(needle.len())
		.position(|window| window == needle)
		.map(|n| from + n)
}

/// End of an interpreted string or rune literal starting at `start`.
fn quoted_end(src: &[u8], start: usize) -> usize {
	let quote = src[start];
	let mut i = start + 1;
	while i < src.len() {
		match src[i] {
			b'\\' => i += 2,
			b'\n' => return i,
			byte if byte == quote => return i + 1,
			_ => i += 1,
		}
	}
	src.len()
}

fn skip_blanks(src: &[u8], mut i: usize, newlines: bool) -> usize {
	while let Some(&byte) = src.get(i) {
		let blank = byte == b' ' || byte == b'\t' || byte == b'\r' || (newlines && byte == b'\n');
		if !blank {
			break;
		}
		i += 1;
	}
	i
}

fn is_ident_byte(byte: u8) -> bool {
	byte.is_ascii_alphanumeric() || byte == b'_' || byte >= 0x80
}

/// Start offsets of every spec inside a `type ( ... )` group opened just before `i`.
fn group_specs(src: &[u8], mut i: usize, out: &mut Vec<usize>) {
	let mut depth = 0usize;
	let mut spec_start = true;
	while let Some(&byte) = src.get(i) {
		if spec_start && !matches!(byte, b' ' | b'\t' | b'\r' | b'\n' | b';') {
			out.push(i);
			spec_start = false;
		}
		match byte {
			b'(' | b'[' | b'{' => depth += 1,
			b')' if depth == 0 => return,
			b')' | b']' | b'}' => depth = depth.saturating_sub(1),
			b'\n' | b';' if depth == 0 => spec_start = true,
			_ => {}
		}
		i += 1;
	}
}

/// Match `Name [ ... ] =` at `start`, returning the name end and the bracket offsets.
fn alias_params_at(src: &[u8], start: usize) -> Option<(usize, usize, usize)> {
	let mut i = start;
	while src.get(i).copied().is_some_and(is_ident_byte) {
		i += 1;
	}
	if i == start || src[start].is_ascii_digit() {
		return None;
	}
	let name_end = i;

	let open = skip_blanks(src, name_end, false);
	if src.get(open) != Some(&b'[') {
		return None;
	}
	let mut depth = 0usize;
	let mut close = None;
	for (offset, &byte) in src[open..].iter().enumerate() {
		match byte {
			b'[' => depth += 1,
			b']' => {
				depth -= 1;
				if depth == 0 {
					close = Some(open + offset);
					break;
				}
			}
			_ => {}
		}
	}
	let close = close?;

	let eq = skip_blanks(src, close + 1, false);
	(src.get(eq) == Some(&b'=') && src.get(eq + 1) != Some(&b'=')).then_some((name_end, open, close))
}
