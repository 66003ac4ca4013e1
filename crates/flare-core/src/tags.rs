// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tag mapping merged into every reported event.
//!
//! Tags carry deployment/session context (deployed commit, environment,
//! user info) and replace the ambient process-wide global the original
//! design read them from. They are merged into the event payload after the
//! base fields, so a tag sharing a key with a base field overrides it.

use serde_json::{Map, Value};

/// A builder for the tag mapping attached to reported events.
///
/// # Example
///
/// ```
/// use flare_core::Tags;
///
/// let tags = Tags::new()
///     .insert("version", "1.2.3")
///     .insert("environment", "production")
///     .insert("is_canary", false);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tags {
	inner: Map<String, Value>,
}

impl Tags {
	/// Creates a new empty tag mapping.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair, replacing any existing value for the key.
	///
	/// The value can be any type that implements `Into<serde_json::Value>`,
	/// including strings, numbers, booleans, arrays, and nested objects.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Merges another tag mapping into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: Tags) -> Self {
		for (k, v) in other.inner {
			self.inner.insert(k, v);
		}
		self
	}

	/// Returns true if there are no tags.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Returns the number of tags.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Gets a tag value by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Removes a tag by key, returning its value if present.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.inner.remove(key)
	}

	/// Sets a key-value pair in place (non-consuming variant of `insert`).
	pub fn set<K, V>(&mut self, key: K, value: V)
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
	}

	/// Iterates over the tag entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.inner.iter()
	}

	/// Converts the tags into a `serde_json::Value`.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Tags> for Value {
	fn from(tags: Tags) -> Self {
		tags.into_value()
	}
}

impl From<Value> for Tags {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Tags {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_tags_new_is_empty() {
		let tags = Tags::new();
		assert!(tags.is_empty());
		assert_eq!(tags.len(), 0);
	}

	#[test]
	fn test_tags_insert_string() {
		let tags = Tags::new().insert("version", "1.2.3");
		assert_eq!(
			tags.get("version"),
			Some(&Value::String("1.2.3".to_string()))
		);
	}

	#[test]
	fn test_tags_insert_replaces_existing() {
		let tags = Tags::new().insert("env", "staging").insert("env", "production");
		assert_eq!(tags.len(), 1);
		assert_eq!(tags.get("env"), Some(&Value::String("production".to_string())));
	}

	#[test]
	fn test_tags_merge_right_side_wins() {
		let base = Tags::new().insert("a", 1).insert("b", 2);
		let overlay = Tags::new().insert("b", 20).insert("c", 3);

		let merged = base.merge(overlay);

		assert_eq!(merged.len(), 3);
		assert_eq!(merged.get("a"), Some(&Value::Number(1.into())));
		assert_eq!(merged.get("b"), Some(&Value::Number(20.into())));
		assert_eq!(merged.get("c"), Some(&Value::Number(3.into())));
	}

	#[test]
	fn test_tags_set_and_remove() {
		let mut tags = Tags::new();
		tags.set("commit", "abc1234");
		assert_eq!(tags.len(), 1);

		let removed = tags.remove("commit");
		assert_eq!(removed, Some(Value::String("abc1234".to_string())));
		assert!(tags.is_empty());
	}

	#[test]
	fn test_tags_into_value() {
		let tags = Tags::new().insert("key", "value");
		let val = tags.into_value();

		assert!(val.is_object());
		assert_eq!(val["key"], "value");
	}

	#[test]
	fn test_tags_from_non_object_value() {
		let val = Value::String("not an object".to_string());
		let tags = Tags::from(val);

		assert!(tags.is_empty());
	}

	proptest! {
		#[test]
		fn tags_len_matches_unique_insertions(keys in proptest::collection::vec("[a-z]{1,10}", 0..20)) {
			let unique_keys: std::collections::HashSet<_> = keys.iter().cloned().collect();
			let mut tags = Tags::new();
			for key in &keys {
				tags = tags.insert(key.clone(), "value");
			}
			prop_assert_eq!(tags.len(), unique_keys.len());
		}

		#[test]
		fn tags_get_returns_inserted_value(key in "[a-z]{1,20}", value in "[a-zA-Z0-9]{1,50}") {
			let tags = Tags::new().insert(key.clone(), value.clone());
			prop_assert_eq!(tags.get(&key), Some(&Value::String(value)));
		}

		#[test]
		fn tags_merge_is_left_identity_for_empty(key in "[a-z]{1,20}", value in "[a-zA-Z0-9]{1,50}") {
			let tags = Tags::new().insert(key.clone(), value.clone());
			let merged = Tags::new().merge(tags);
			prop_assert_eq!(merged.get(&key), Some(&Value::String(value)));
		}
	}
}
