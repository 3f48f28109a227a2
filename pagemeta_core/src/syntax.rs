use std::path::Path;

use tree_sitter::Language;
use tree_sitter::Node;
use tree_sitter::Parser;
use tree_sitter::Tree;

use crate::PagemetaError;
use crate::PagemetaResult;

/// Grammar used to parse a page file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
	/// JavaScript, including JSX.
	JavaScript,
	/// TypeScript without markup.
	TypeScript,
	/// TypeScript with JSX markup.
	Tsx,
}

impl SourceLanguage {
	/// Determine the grammar from a file path. Unknown extensions use
	/// [`SourceLanguage::Tsx`] since it accepts both type annotations and
	/// inline markup.
	pub fn from_path(path: &Path) -> Self {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
			.unwrap_or(Self::Tsx)
	}

	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext {
			"js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
			"ts" | "mts" | "cts" => Some(Self::TypeScript),
			"tsx" => Some(Self::Tsx),
			_ => None,
		}
	}

	fn grammar(self) -> Language {
		match self {
			Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
			Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
			Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
		}
	}
}

/// Parse source text into a syntax tree.
///
/// Comments are kept in the tree as `comment` nodes; callers skip them.
/// Trees that contain syntax errors are rejected with
/// [`PagemetaError::Parse`] pointing at the first error.
pub fn parse_source(content: &str, language: SourceLanguage) -> PagemetaResult<Tree> {
	let mut parser = Parser::new();
	parser
		.set_language(&language.grammar())
		.map_err(|e| PagemetaError::Language(e.to_string()))?;

	let tree = parser
		.parse(content, None)
		.ok_or_else(|| PagemetaError::Parse { line: 1, column: 1 })?;

	let root = tree.root_node();
	if root.has_error() {
		let error_node = first_error(root).unwrap_or(root);
		let point = error_node.start_position();
		return Err(PagemetaError::Parse {
			line: point.row + 1,
			column: point.column + 1,
		});
	}

	Ok(tree)
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
	if node.is_error() || node.is_missing() {
		return Some(node);
	}

	let mut cursor = node.walk();
	for child in node.children(&mut cursor) {
		if child.has_error() {
			if let Some(found) = first_error(child) {
				return Some(found);
			}
		}
	}

	None
}

/// Source text covered by a node.
pub fn node_text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
	&source[node.start_byte()..node.end_byte()]
}

/// Decode the value of a `string` literal node, resolving escape sequences.
pub fn string_literal_value(node: &Node<'_>, source: &str) -> String {
	let mut value = String::new();
	let mut cursor = node.walk();
	for child in node.named_children(&mut cursor) {
		match child.kind() {
			"string_fragment" => value.push_str(node_text(&child, source)),
			"escape_sequence" => push_escape(&mut value, node_text(&child, source)),
			_ => {}
		}
	}
	value
}

/// Append the character(s) described by a single escape sequence such as
/// `\n`, `\x41`, `\u0041` or `\u{1F600}`.
fn push_escape(value: &mut String, escape: &str) {
	let Some(body) = escape.strip_prefix('\\') else {
		value.push_str(escape);
		return;
	};

	let mut chars = body.chars();
	let Some(first) = chars.next() else {
		return;
	};

	match first {
		'n' => value.push('\n'),
		'r' => value.push('\r'),
		't' => value.push('\t'),
		'b' => value.push('\u{8}'),
		'f' => value.push('\u{c}'),
		'v' => value.push('\u{b}'),
		'0' if body.len() == 1 => value.push('\0'),
		// Line continuation.
		'\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
		'x' => push_code_point(value, &body[1..], escape),
		'u' => {
			let digits = body[1..].trim_start_matches('{').trim_end_matches('}');
			push_code_point(value, digits, escape);
		}
		other => value.push(other),
	}
}

fn push_code_point(value: &mut String, digits: &str, escape: &str) {
	match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
		Some(ch) => value.push(ch),
		None => value.push_str(escape),
	}
}
