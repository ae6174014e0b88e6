//! In-memory override store, used for tests and embedded setups

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use coursecfg_types::override_store::{OverrideStore, PersistedOverrideRecord};

use crate::prelude::*;

#[derive(Debug, Default)]
pub struct InMemoryOverrideStore {
	records: RwLock<BTreeMap<(String, String), PersistedOverrideRecord>>,
	reads: AtomicUsize,
}

impl InMemoryOverrideStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of `read_override` calls served so far
	pub fn read_count(&self) -> usize {
		self.reads.load(Ordering::Relaxed)
	}

	/// Store a record directly, bypassing any cache in front of the store
	pub fn insert(&self, record: PersistedOverrideRecord) {
		self.records.write().insert((record.namespace.clone(), record.name.clone()), record);
	}
}

#[async_trait]
impl OverrideStore for InMemoryOverrideStore {
	async fn read_override(
		&self,
		namespace: &str,
		name: &str,
	) -> ClResult<Option<PersistedOverrideRecord>> {
		self.reads.fetch_add(1, Ordering::Relaxed);
		Ok(self.records.read().get(&(namespace.to_string(), name.to_string())).cloned())
	}

	async fn list_overrides(&self, namespace: &str) -> ClResult<Vec<PersistedOverrideRecord>> {
		Ok(self
			.records
			.read()
			.values()
			.filter(|rec| rec.namespace == namespace)
			.cloned()
			.collect())
	}

	async fn write_override(&self, record: &PersistedOverrideRecord) -> ClResult<()> {
		self.insert(record.clone());
		Ok(())
	}

	async fn delete_override(&self, namespace: &str, name: &str) -> ClResult<bool> {
		Ok(self.records.write().remove(&(namespace.to_string(), name.to_string())).is_some())
	}
}

// vim: ts=4
