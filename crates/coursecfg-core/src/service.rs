//! Configuration service: full resolution chain with persisted overrides
//!
//! Resolution order for a property in a namespace:
//! namespace record -> global record -> environment -> default.
//! Draft records never apply. Persisted lookups are cached per
//! (namespace, name); environment lookups are not cached.

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::Arc;

use coursecfg_types::override_store::{OverrideStore, PersistedOverrideRecord};

use crate::prelude::*;
use crate::property::{Resolved, ValueSource};

/// LRU cache of cast persisted overrides.
///
/// `None` entries record that no active override exists. Every invalidation
/// bumps an epoch; a lookup that started before the bump cannot populate the
/// cache, so a value read before an override write never outlives the write.
pub struct OverrideCache {
	inner: Mutex<CacheInner>,
}

struct CacheInner {
	entries: LruCache<(String, String), Option<ConfigValue>>,
	epoch: u64,
}

impl OverrideCache {
	pub fn new(capacity: usize) -> Self {
		let non_zero = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
		Self { inner: Mutex::new(CacheInner { entries: LruCache::new(non_zero), epoch: 0 }) }
	}

	pub fn get(&self, namespace: &str, name: &str) -> Option<Option<ConfigValue>> {
		self.inner.lock().entries.get(&(namespace.to_string(), name.to_string())).cloned()
	}

	/// Current epoch, taken before reading the store
	pub fn epoch(&self) -> u64 {
		self.inner.lock().epoch
	}

	/// Store a lookup result unless the cache was invalidated since `epoch`
	pub fn put(
		&self,
		namespace: &str,
		name: &str,
		value: Option<ConfigValue>,
		epoch: u64,
	) -> bool {
		let mut inner = self.inner.lock();
		if inner.epoch != epoch {
			return false;
		}
		inner.entries.put((namespace.to_string(), name.to_string()), value);
		true
	}

	pub fn invalidate(&self, namespace: &str, name: &str) {
		let mut inner = self.inner.lock();
		inner.epoch = inner.epoch.wrapping_add(1);
		inner.entries.pop(&(namespace.to_string(), name.to_string()));
	}

	pub fn clear(&self) {
		let mut inner = self.inner.lock();
		inner.epoch = inner.epoch.wrapping_add(1);
		inner.entries.clear();
	}

	pub fn len(&self) -> usize {
		self.inner.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Enumeration record for administration surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
	pub name: String,
	pub doc_string: String,
	pub value_type: &'static str,
	pub default_value: ConfigValue,
	pub value: ConfigValue,
	pub source: ValueSource,
}

pub struct ConfigService {
	registry: Arc<PropertyRegistry>,
	env: Arc<EnvOverrides>,
	store: Option<Arc<dyn OverrideStore>>,
	cache: OverrideCache,
}

impl ConfigService {
	pub fn new(
		registry: Arc<PropertyRegistry>,
		env: Arc<EnvOverrides>,
		store: Option<Arc<dyn OverrideStore>>,
		cache_size: usize,
	) -> Self {
		Self { registry, env, store, cache: OverrideCache::new(cache_size) }
	}

	pub fn registry(&self) -> &Arc<PropertyRegistry> {
		&self.registry
	}

	pub fn env(&self) -> &Arc<EnvOverrides> {
		&self.env
	}

	pub fn has_store(&self) -> bool {
		self.store.is_some()
	}

	fn property(&self, name: &str) -> ClResult<Arc<ConfigProperty>> {
		self.registry.get(name).ok_or(Error::NotFound)
	}

	fn store(&self) -> ClResult<&Arc<dyn OverrideStore>> {
		self.store
			.as_ref()
			.ok_or_else(|| Error::ConfigError("No override store configured".into()))
	}

	/// Active persisted value of `property` in exactly `namespace`
	async fn persisted_in(
		&self,
		store: &Arc<dyn OverrideStore>,
		namespace: &str,
		property: &ConfigProperty,
	) -> Option<ConfigValue> {
		if let Some(cached) = self.cache.get(namespace, property.name()) {
			// Entries cast for a since-replaced declaration are refetched
			if cached.as_ref().is_none_or(|v| v.value_type() == property.value_type()) {
				debug!("Override cache hit: {}/{}", namespace, property.name());
				return cached;
			}
		}

		let epoch = self.cache.epoch();
		let record = match store.read_override(namespace, property.name()).await {
			Ok(record) => record,
			Err(err) => {
				warn!(
					"Override lookup for {}/{} failed, skipping persisted layer: {}",
					namespace,
					property.name(),
					err
				);
				return None;
			}
		};

		let value = record.filter(PersistedOverrideRecord::is_active).and_then(|rec| {
			property
				.value_type()
				.cast(&rec.value)
				.inspect_err(|err| {
					warn!(
						"Persisted override {}/{} failed to cast to type {}; ignoring: {}",
						namespace,
						property.name(),
						property.value_type(),
						err
					);
				})
				.ok()
		});

		if !self.cache.put(namespace, property.name(), value.clone(), epoch) {
			debug!(
				"Override {}/{} invalidated during lookup, not cached",
				namespace,
				property.name()
			);
		}
		value
	}

	async fn persisted(&self, namespace: &str, property: &ConfigProperty) -> Option<Resolved> {
		let store = self.store.as_ref()?;

		let mut namespaces = vec![namespace];
		if namespace != GLOBAL_NAMESPACE {
			namespaces.push(GLOBAL_NAMESPACE);
		}

		for ns in namespaces {
			if let Some(value) = self.persisted_in(store, ns, property).await {
				return Some(Resolved {
					value,
					source: ValueSource::Persisted { namespace: ns.to_string() },
				});
			}
		}
		None
	}

	async fn resolve_property(&self, namespace: &str, property: &ConfigProperty) -> Resolved {
		match self.persisted(namespace, property).await {
			Some(resolved) => resolved,
			None => property.resolve(&self.env),
		}
	}

	/// Resolve a property with its source
	pub async fn resolve(&self, namespace: &str, name: &str) -> ClResult<Resolved> {
		let property = self.property(name)?;
		Ok(self.resolve_property(namespace, &property).await)
	}

	/// Current value of a property
	pub async fn value(&self, namespace: &str, name: &str) -> ClResult<ConfigValue> {
		Ok(self.resolve(namespace, name).await?.value)
	}

	pub async fn get_string(&self, namespace: &str, name: &str) -> ClResult<String> {
		match self.value(namespace, name).await? {
			ConfigValue::String(s) => Ok(s),
			v => Err(Error::ValidationError(format!(
				"Property '{}' is not a string, got {}",
				name,
				v.type_name()
			))),
		}
	}

	pub async fn get_int(&self, namespace: &str, name: &str) -> ClResult<i64> {
		match self.value(namespace, name).await? {
			ConfigValue::Int(i) => Ok(i),
			v => Err(Error::ValidationError(format!(
				"Property '{}' is not an integer, got {}",
				name,
				v.type_name()
			))),
		}
	}

	pub async fn get_bool(&self, namespace: &str, name: &str) -> ClResult<bool> {
		match self.value(namespace, name).await? {
			ConfigValue::Bool(b) => Ok(b),
			v => Err(Error::ValidationError(format!(
				"Property '{}' is not a boolean, got {}",
				name,
				v.type_name()
			))),
		}
	}

	async fn describe_property(&self, namespace: &str, property: &ConfigProperty) -> PropertyInfo {
		let Resolved { value, source } = self.resolve_property(namespace, property).await;
		PropertyInfo {
			name: property.name().to_string(),
			doc_string: property.doc_string().to_string(),
			value_type: property.value_type().name(),
			default_value: property.default_value().clone(),
			value,
			source,
		}
	}

	pub async fn describe(&self, namespace: &str, name: &str) -> ClResult<PropertyInfo> {
		let property = self.property(name)?;
		Ok(self.describe_property(namespace, &property).await)
	}

	/// Describe every registered property in registration order
	pub async fn describe_all(&self, namespace: &str) -> Vec<PropertyInfo> {
		let mut list = Vec::with_capacity(self.registry.len());
		for property in self.registry.all() {
			list.push(self.describe_property(namespace, &property).await);
		}
		list
	}

	/// Persist an override after checking that it casts
	pub async fn set_override(
		&self,
		namespace: &str,
		name: &str,
		raw: impl Into<String>,
		is_draft: bool,
	) -> ClResult<PersistedOverrideRecord> {
		let property = self.property(name)?;
		let store = self.store()?;

		let raw = raw.into();
		property.value_type().cast(&raw)?;

		let record = PersistedOverrideRecord::new(namespace, name, raw).draft(is_draft);
		store.write_override(&record).await?;
		self.cache.invalidate(namespace, name);

		info!("Override for '{}' stored in namespace '{}' (draft={})", name, namespace, is_draft);
		Ok(record)
	}

	/// Remove a persisted override; resolution falls back to the next layer
	pub async fn delete_override(&self, namespace: &str, name: &str) -> ClResult<bool> {
		let store = self.store()?;
		let removed = store.delete_override(namespace, name).await?;
		self.cache.invalidate(namespace, name);

		if removed {
			info!("Override for '{}' deleted in namespace '{}'", name, namespace);
		}
		Ok(removed)
	}

	pub async fn list_overrides(&self, namespace: &str) -> ClResult<Vec<PersistedOverrideRecord>> {
		match &self.store {
			Some(store) => store.list_overrides(namespace).await,
			None => Ok(Vec::new()),
		}
	}

	/// Drop all cached persisted lookups
	pub fn refresh(&self) {
		self.cache.clear();
		info!("Override cache cleared");
	}
}


// vim: ts=4
