//! Persisted override store interface
//!
//! The store is an external collaborator: it only keeps raw strings keyed by
//! (namespace, name). Selecting the active record and casting it is done by
//! the resolution chain in `coursecfg-core`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

/// A persisted, raw (untyped) override for one property in one namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedOverrideRecord {
	/// Partition key, e.g. one course. The empty string is the global namespace.
	pub namespace: String,
	pub name: String,
	pub value: String,
	/// Draft records are stored but never applied
	pub is_draft: bool,
}

impl PersistedOverrideRecord {
	pub fn new(
		namespace: impl Into<String>,
		name: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			value: value.into(),
			is_draft: false,
		}
	}

	pub fn draft(mut self, is_draft: bool) -> Self {
		self.is_draft = is_draft;
		self
	}

	/// Whether this record takes part in resolution
	pub fn is_active(&self) -> bool {
		!self.is_draft
	}
}

#[async_trait]
pub trait OverrideStore: Debug + Send + Sync {
	/// Reads the record stored for `name` in `namespace`, draft or not
	async fn read_override(
		&self,
		namespace: &str,
		name: &str,
	) -> ClResult<Option<PersistedOverrideRecord>>;

	/// Lists every record of a namespace, ordered by name
	async fn list_overrides(&self, namespace: &str) -> ClResult<Vec<PersistedOverrideRecord>>;

	/// Creates or replaces the record for (namespace, name)
	async fn write_override(&self, record: &PersistedOverrideRecord) -> ClResult<()>;

	/// Removes a record. Returns false if there was nothing to remove.
	async fn delete_override(&self, namespace: &str, name: &str) -> ClResult<bool>;
}

// vim: ts=4
