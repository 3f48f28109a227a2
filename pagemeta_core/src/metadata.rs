use std::fmt;

use derive_more::Deref;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

/// Field name that is always normalized to a list.
pub const KEYWORDS_KEY: &str = "keywords";

/// A single extracted metadata value.
///
/// Only literal strings and literal arrays of strings are ever produced by the
/// extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
	Text(String),
	List(Vec<String>),
}

impl MetadataValue {
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::List(_) => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			Self::Text(_) => None,
			Self::List(list) => Some(list),
		}
	}
}

impl From<&str> for MetadataValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_string())
	}
}

impl From<Vec<&str>> for MetadataValue {
	fn from(value: Vec<&str>) -> Self {
		Self::List(value.into_iter().map(String::from).collect())
	}
}

/// Extracted metadata for one page, keyed by field name.
///
/// Keys keep the order in which they were first recorded. Recording an
/// existing key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct MetadataFields(Vec<(String, MetadataValue)>);

impl MetadataFields {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&MetadataValue> {
		self.0
			.iter()
			.find(|(name, _)| name == key)
			.map(|(_, value)| value)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
		let key = key.into();
		if let Some(slot) = self.0.iter_mut().find(|(name, _)| *name == key) {
			slot.1 = value;
		} else {
			self.0.push((key, value));
		}
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(name, _)| name.as_str())
	}

	/// Wrap a bare string `keywords` value into a one element list.
	pub(crate) fn normalize_keywords(&mut self) {
		if let Some((_, value)) = self.0.iter_mut().find(|(name, _)| name == KEYWORDS_KEY) {
			if let MetadataValue::Text(text) = value {
				*value = MetadataValue::List(vec![std::mem::take(text)]);
			}
		}
	}
}

impl<K: Into<String>, V: Into<MetadataValue>> FromIterator<(K, V)> for MetadataFields {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut fields = Self::new();
		for (key, value) in iter {
			fields.insert(key, value.into());
		}
		fields
	}
}

impl Serialize for MetadataFields {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (key, value) in &self.0 {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

struct MetadataFieldsVisitor;

impl<'de> Visitor<'de> for MetadataFieldsVisitor {
	type Value = MetadataFields;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a map of metadata field names to strings or string lists")
	}

	fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
		let mut fields = MetadataFields::new();
		while let Some((key, value)) = access.next_entry::<String, MetadataValue>()? {
			fields.insert(key, value);
		}
		Ok(fields)
	}
}

impl<'de> Deserialize<'de> for MetadataFields {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		deserializer.deserialize_map(MetadataFieldsVisitor)
	}
}

/// Metadata collected from a single page file together with its route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
	/// Route path derived from the page file's directory, e.g. `/blog/post`.
	pub pathname: String,
	pub metadata: MetadataFields,
}
