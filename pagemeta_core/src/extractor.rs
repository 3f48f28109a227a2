use std::collections::BTreeSet;

use tree_sitter::Node;

use crate::MetadataFields;
use crate::MetadataValue;
use crate::PagemetaResult;
use crate::syntax::SourceLanguage;
use crate::syntax::node_text;
use crate::syntax::parse_source;
use crate::syntax::string_literal_value;

/// Name of the page export that carries static metadata.
pub const METADATA_IDENTIFIER: &str = "metadata";

/// Node kinds that behave like identifiers for the purpose of spotting the
/// `metadata` name.
const IDENTIFIER_KINDS: &[&str] = &[
	"identifier",
	"property_identifier",
	"shorthand_property_identifier",
	"shorthand_property_identifier_pattern",
	"type_identifier",
];

/// Markup nodes whose identifier children are tag or attribute names.
const MARKUP_NAME_PARENTS: &[&str] = &[
	"jsx_opening_element",
	"jsx_closing_element",
	"jsx_self_closing_element",
	"jsx_attribute",
	"jsx_namespace_name",
];

/// Extract whitelisted literal fields from the static `metadata` export of a
/// page source file.
///
/// Returns `Ok(None)` when the file has no static metadata object, for
/// example when it only exports a `generateMetadata` function. Syntax errors
/// are returned as [`crate::PagemetaError::Parse`].
///
/// Collection is triggered by the first identifier named `metadata`. From
/// that point on every property with a whitelisted plain-identifier key
/// contributes, whichever object it belongs to. String values are recorded
/// as text, arrays as the list of their string literal elements, and every
/// other value (nested objects, templates, calls, numbers) is ignored.
///
/// ```rust
/// use std::collections::BTreeSet;
///
/// use pagemeta_core::MetadataValue;
/// use pagemeta_core::SourceLanguage;
/// use pagemeta_core::extract_metadata;
///
/// let keys: BTreeSet<String> = ["title".to_string(), "keywords".to_string()].into();
/// let source = r#"export const metadata = { title: "Home", keywords: "rust" };"#;
/// let fields = extract_metadata(source, &keys, SourceLanguage::JavaScript)
/// 	.unwrap()
/// 	.unwrap();
///
/// assert_eq!(fields.get("title"), Some(&MetadataValue::from("Home")));
/// assert_eq!(fields.get("keywords"), Some(&MetadataValue::from(vec!["rust"])));
/// ```
pub fn extract_metadata(
	source: &str,
	keys: &BTreeSet<String>,
	language: SourceLanguage,
) -> PagemetaResult<Option<MetadataFields>> {
	let tree = parse_source(source, language)?;
	let mut walker = MetadataWalker::new(source, keys);
	walker.walk(tree.root_node());

	if !walker.triggered || !walker.static_object {
		return Ok(None);
	}

	let mut fields = walker.fields;
	fields.normalize_keywords();
	Ok(Some(fields))
}

struct MetadataWalker<'a> {
	source: &'a str,
	keys: &'a BTreeSet<String>,
	/// Set once an identifier named `metadata` has been visited.
	triggered: bool,
	/// Set once `metadata` is seen bound to an object literal.
	static_object: bool,
	fields: MetadataFields,
}

impl<'a> MetadataWalker<'a> {
	fn new(source: &'a str, keys: &'a BTreeSet<String>) -> Self {
		Self {
			source,
			keys,
			triggered: false,
			static_object: false,
			fields: MetadataFields::new(),
		}
	}

	/// Pre-order traversal over every named node.
	fn walk(&mut self, root: Node<'_>) {
		let mut cursor = root.walk();
		loop {
			let node = cursor.node();
			if node.is_named() {
				self.visit(node);
			}

			if cursor.goto_first_child() {
				continue;
			}

			loop {
				if cursor.goto_next_sibling() {
					break;
				}
				if !cursor.goto_parent() {
					return;
				}
			}
		}
	}

	fn visit(&mut self, node: Node<'_>) {
		if !self.triggered && self.is_metadata_identifier(node) {
			self.triggered = true;
		}

		if !self.static_object && self.is_static_metadata_binding(node) {
			self.static_object = true;
		}

		if !self.triggered {
			return;
		}

		if let Some((key, value)) = property_parts(node) {
			let name = node_text(&key, self.source);
			if key.kind() == "property_identifier" && self.keys.contains(name) {
				self.record(name, value);
			}
		}
	}

	fn record(&mut self, key: &str, value: Node<'_>) {
		let value = unwrap_parentheses(value);
		match value.kind() {
			"string" => {
				let text = string_literal_value(&value, self.source);
				self.fields.insert(key, MetadataValue::Text(text));
			}
			"array" => {
				let mut cursor = value.walk();
				let items = value
					.named_children(&mut cursor)
					.map(unwrap_parentheses)
					.filter(|item| item.kind() == "string")
					.map(|item| string_literal_value(&item, self.source))
					.collect();
				self.fields.insert(key, MetadataValue::List(items));
			}
			_ => {}
		}
	}

	fn is_metadata_identifier(&self, node: Node<'_>) -> bool {
		if !IDENTIFIER_KINDS.contains(&node.kind()) {
			return false;
		}

		// Markup tag and attribute names are not identifiers. Expressions
		// embedded in markup (`{metadata}`) still are.
		if node
			.parent()
			.is_some_and(|parent| MARKUP_NAME_PARENTS.contains(&parent.kind()))
		{
			return false;
		}

		node_text(&node, self.source) == METADATA_IDENTIFIER
	}

	/// `const metadata = { ... }` or `metadata = { ... }`, allowing type
	/// assertions around the object literal.
	fn is_static_metadata_binding(&self, node: Node<'_>) -> bool {
		let (target, value) = match node.kind() {
			"variable_declarator" => (
				node.child_by_field_name("name"),
				node.child_by_field_name("value"),
			),
			"assignment_expression" => (
				node.child_by_field_name("left"),
				node.child_by_field_name("right"),
			),
			_ => return false,
		};

		let (Some(target), Some(value)) = (target, value) else {
			return false;
		};

		let target = match target.kind() {
			"member_expression" => {
				let Some(property) = target.child_by_field_name("property") else {
					return false;
				};
				property
			}
			_ => target,
		};

		node_text(&target, self.source) == METADATA_IDENTIFIER
			&& unwrap_type_assertions(value).kind() == "object"
	}
}

/// Key and value nodes of an object property or class field.
fn property_parts(node: Node<'_>) -> Option<(Node<'_>, Node<'_>)> {
	let key = match node.kind() {
		"pair" => node.child_by_field_name("key"),
		"public_field_definition" => node.child_by_field_name("name"),
		"field_definition" => node.child_by_field_name("property"),
		_ => None,
	}?;
	let value = node.child_by_field_name("value")?;
	Some((key, value))
}

fn first_expression(node: Node<'_>) -> Option<Node<'_>> {
	let mut cursor = node.walk();
	node.named_children(&mut cursor)
		.find(|child| child.kind() != "comment")
}

fn unwrap_parentheses(mut node: Node<'_>) -> Node<'_> {
	while node.kind() == "parenthesized_expression" {
		let Some(inner) = first_expression(node) else {
			break;
		};
		node = inner;
	}
	node
}

fn unwrap_type_assertions(mut node: Node<'_>) -> Node<'_> {
	loop {
		let inner = match node.kind() {
			"parenthesized_expression" | "as_expression" | "satisfies_expression" => {
				first_expression(node)
			}
			"type_assertion" => {
				let mut cursor = node.walk();
				node.named_children(&mut cursor)
					.filter(|child| child.kind() != "comment")
					.last()
			}
			_ => None,
		};

		let Some(inner) = inner else {
			return node;
		};
		node = inner;
	}
}
