//! Resolution through the SQLite store
//!
//! Runs the full precedence chain with persisted overrides kept in SQLite.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use coursecfg_core::{
	ConfigProperty, ConfigService, EnvOverrides, MapEnv, PropertyRegistry, ValueSource,
};
use coursecfg_override_adapter_sqlite::OverrideAdapterSqlite;
use coursecfg_types::types::{ConfigValue, ValueType};
use tempfile::TempDir;

async fn create_service() -> (ConfigService, Arc<MapEnv>, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let store = OverrideAdapterSqlite::new(temp_dir.path().join("overrides.db"))
		.await
		.expect("Failed to create adapter");

	let registry = Arc::new(PropertyRegistry::new());
	registry.register(
		ConfigProperty::new("gcb-int-prop", ValueType::Integer, "doc for int_prop", 123)
			.expect("Valid declaration"),
	);

	let env = Arc::new(MapEnv::new());
	let service = ConfigService::new(
		registry,
		Arc::new(EnvOverrides::new(env.clone())),
		Some(Arc::new(store)),
		32,
	);
	(service, env, temp_dir)
}

#[tokio::test]
async fn test_precedence_chain() {
	let (service, env, _temp) = create_service().await;

	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 123);

	env.set("gcb-int-prop", "12345");
	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 12345);

	service.set_override("", "gcb-int-prop", "5", false).await.unwrap();
	let resolved = service.resolve("ns_course", "gcb-int-prop").await.unwrap();
	assert_eq!(resolved.value, ConfigValue::Int(5));
	assert_eq!(resolved.source, ValueSource::Persisted { namespace: String::new() });

	service.set_override("ns_course", "gcb-int-prop", "6", false).await.unwrap();
	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 6);

	service.delete_override("ns_course", "gcb-int-prop").await.unwrap();
	service.delete_override("", "gcb-int-prop").await.unwrap();
	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 12345);

	env.remove("gcb-int-prop");
	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 123);
}

#[tokio::test]
async fn test_draft_is_stored_but_not_applied() {
	let (service, _env, _temp) = create_service().await;
	service.set_override("ns_course", "gcb-int-prop", "9", true).await.unwrap();

	assert_eq!(service.get_int("ns_course", "gcb-int-prop").await.unwrap(), 123);
	let records = service.list_overrides("ns_course").await.unwrap();
	assert_eq!(records.len(), 1);
	assert!(records[0].is_draft);
}

// vim: ts=4
