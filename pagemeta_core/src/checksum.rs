use serde::Serialize;
use serde_json::Value;

use crate::PageMetadata;
use crate::PagemetaResult;

/// Compute the content fingerprint of a metadata collection.
///
/// Object keys are hashed in sorted order and array elements are hashed as a
/// sorted set of element digests, so reordering pages or list entries does
/// not change the fingerprint.
pub fn collection_checksum(collection: &[PageMetadata]) -> PagemetaResult<String> {
	checksum_of(collection)
}

/// Fingerprint any serializable value with the same rules as
/// [`collection_checksum`].
pub fn checksum_of<T: Serialize + ?Sized>(value: &T) -> PagemetaResult<String> {
	let value = serde_json::to_value(value)?;
	Ok(digest(&value).to_hex().to_string())
}

fn digest(value: &Value) -> blake3::Hash {
	let mut hasher = blake3::Hasher::new();
	match value {
		Value::Null => {
			hasher.update(b"null");
		}
		Value::Bool(flag) => {
			hasher.update(b"bool:");
			hasher.update(if *flag { b"1" } else { b"0" });
		}
		Value::Number(number) => {
			hasher.update(b"number:");
			hasher.update(number.to_string().as_bytes());
		}
		Value::String(text) => {
			hasher.update(b"string:");
			hasher.update(&(text.len() as u64).to_le_bytes());
			hasher.update(text.as_bytes());
		}
		Value::Array(items) => {
			let mut digests: Vec<blake3::Hash> = items.iter().map(digest).collect();
			digests.sort_unstable_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
			hasher.update(b"array:");
			hasher.update(&(digests.len() as u64).to_le_bytes());
			for item in &digests {
				hasher.update(item.as_bytes());
			}
		}
		Value::Object(entries) => {
			let mut keys: Vec<&String> = entries.keys().collect();
			keys.sort();
			hasher.update(b"object:");
			hasher.update(&(keys.len() as u64).to_le_bytes());
			for key in keys {
				hasher.update(&(key.len() as u64).to_le_bytes());
				hasher.update(key.as_bytes());
				hasher.update(digest(&entries[key]).as_bytes());
			}
		}
	}
	hasher.finalize()
}

/// Remembers the fingerprint of the last collection that was written.
///
/// The state lives as long as the detector value; a fresh detector always
/// reports the first collection as changed.
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
	previous: Option<String>,
}

impl ChangeDetector {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` when `collection` has the same fingerprint as the last
	/// changed collection. Otherwise the new fingerprint is stored and `false`
	/// is returned.
	pub fn is_unchanged(&mut self, collection: &[PageMetadata]) -> PagemetaResult<bool> {
		let checksum = collection_checksum(collection)?;

		if self.previous.as_deref() == Some(checksum.as_str()) {
			return Ok(true);
		}

		self.previous = Some(checksum);
		Ok(false)
	}

	/// Fingerprint of the last changed collection, if any.
	pub fn previous(&self) -> Option<&str> {
		self.previous.as_deref()
	}

	/// Forget the stored fingerprint.
	pub fn reset(&mut self) {
		self.previous = None;
	}
}
