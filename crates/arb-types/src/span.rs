//! Diagnostic span attributes.
//!
//! Every failure path in the pipeline records a small attribute bundle
//! (route visualization, amounts, serialized errors) that the telemetry
//! layer turns into span fields. Attributes are required on failures, not
//! optional decoration.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Ordered string-keyed attribute bundle attached to results and failures.
///
/// Backed by a `BTreeMap` so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanAttributes(BTreeMap<String, Value>);

impl SpanAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn remove(&mut self, key: &str) -> Option<Value> {
		self.0.remove(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Merge another bundle into this one, newer values winning.
	pub fn extend(&mut self, other: SpanAttributes) {
		self.0.extend(other.0);
	}

	/// Merge another bundle under a key prefix, keeping hop-level
	/// attributes distinguishable after aggregation.
	pub fn extend_prefixed(&mut self, prefix: &str, other: SpanAttributes) {
		for (k, v) in other.0 {
			self.0.insert(format!("{}.{}", prefix, k), v);
		}
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
		self.0.iter()
	}
}
