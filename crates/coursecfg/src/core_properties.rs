//! Properties configuring the coursecfg server itself
//!
//! These resolve from the environment only: they are needed before the
//! persisted override store is open.

use coursecfg_core::PropertyType;

use crate::prelude::*;

pub const LISTEN: &str = "gcb-listen";
pub const DB_DIR: &str = "gcb-db-dir";
pub const OVERRIDE_CACHE_SIZE: &str = "gcb-override-cache-size";

pub const DEFAULT_OVERRIDE_CACHE_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct CoreProperties {
	pub listen: Property<String>,
	pub db_dir: Property<String>,
	pub override_cache_size: Property<i64>,
}

/// Declare, or pick up already declared, core properties
fn declare<T: PropertyType>(
	registry: &PropertyRegistry,
	name: &str,
	doc_string: &str,
	default: impl Into<ConfigValue>,
) -> ClResult<Property<T>> {
	match registry.get(name) {
		Some(existing) => Property::from_property(existing),
		None => registry.declare(name, doc_string, default),
	}
}

/// Register all core properties
pub fn register_properties(registry: &PropertyRegistry) -> ClResult<CoreProperties> {
	Ok(CoreProperties {
		listen: declare(
			registry,
			LISTEN,
			"Address the administrative API listens on",
			"127.0.0.1:8080",
		)?,
		db_dir: declare(
			registry,
			DB_DIR,
			"Directory holding the persisted override database",
			"./data",
		)?,
		override_cache_size: declare(
			registry,
			OVERRIDE_CACHE_SIZE,
			"Number of persisted override lookups kept in the LRU cache",
			i64::try_from(DEFAULT_OVERRIDE_CACHE_SIZE).unwrap_or(i64::MAX),
		)?,
	})
}


// vim: ts=4
