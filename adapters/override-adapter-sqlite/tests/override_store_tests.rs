//! Override store tests
//!
//! Exercises the SQLite store through the `OverrideStore` trait.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use coursecfg_override_adapter_sqlite::OverrideAdapterSqlite;
use coursecfg_types::override_store::{OverrideStore, PersistedOverrideRecord};
use tempfile::TempDir;

async fn create_test_adapter() -> (OverrideAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = OverrideAdapterSqlite::new(temp_dir.path().join("overrides.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

#[tokio::test]
async fn test_write_and_read_override() {
	let (adapter, _temp) = create_test_adapter().await;
	let record = PersistedOverrideRecord::new("ns_course", "gcb-str-prop", "bar");

	adapter.write_override(&record).await.expect("Should write override");

	let read = adapter.read_override("ns_course", "gcb-str-prop").await.expect("Should read");
	assert_eq!(read, Some(record));
}

#[tokio::test]
async fn test_missing_override_is_none() {
	let (adapter, _temp) = create_test_adapter().await;
	let read = adapter.read_override("ns_course", "gcb-nope").await.expect("Should read");
	assert!(read.is_none());
}

#[tokio::test]
async fn test_namespaces_are_separate() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.write_override(&PersistedOverrideRecord::new("", "gcb-int-prop", "1"))
		.await
		.expect("Should write global");
	adapter
		.write_override(&PersistedOverrideRecord::new("ns_a", "gcb-int-prop", "2"))
		.await
		.expect("Should write ns_a");

	let global = adapter.read_override("", "gcb-int-prop").await.unwrap().unwrap();
	let ns_a = adapter.read_override("ns_a", "gcb-int-prop").await.unwrap().unwrap();
	assert_eq!(global.value, "1");
	assert_eq!(ns_a.value, "2");
	assert!(adapter.read_override("ns_b", "gcb-int-prop").await.unwrap().is_none());
}

#[tokio::test]
async fn test_write_replaces_and_keeps_draft_flag() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.write_override(&PersistedOverrideRecord::new("ns", "gcb-str-prop", "one"))
		.await
		.unwrap();
	adapter
		.write_override(&PersistedOverrideRecord::new("ns", "gcb-str-prop", "two").draft(true))
		.await
		.unwrap();

	let records = adapter.list_overrides("ns").await.unwrap();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].value, "two");
	assert!(records[0].is_draft);
	assert!(!records[0].is_active());
}

#[tokio::test]
async fn test_list_is_ordered_by_name() {
	let (adapter, _temp) = create_test_adapter().await;
	for name in ["gcb-c", "gcb-a", "gcb-b"] {
		adapter.write_override(&PersistedOverrideRecord::new("ns", name, "x")).await.unwrap();
	}
	adapter.write_override(&PersistedOverrideRecord::new("other", "gcb-z", "x")).await.unwrap();

	let names: Vec<_> =
		adapter.list_overrides("ns").await.unwrap().into_iter().map(|r| r.name).collect();
	assert_eq!(names, vec!["gcb-a", "gcb-b", "gcb-c"]);
}

#[tokio::test]
async fn test_delete_override() {
	let (adapter, _temp) = create_test_adapter().await;
	adapter
		.write_override(&PersistedOverrideRecord::new("ns", "gcb-str-prop", "bar"))
		.await
		.unwrap();

	assert!(adapter.delete_override("ns", "gcb-str-prop").await.unwrap());
	assert!(!adapter.delete_override("ns", "gcb-str-prop").await.unwrap());
	assert!(adapter.read_override("ns", "gcb-str-prop").await.unwrap().is_none());
}

#[tokio::test]
async fn test_reopen_keeps_records() {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let path = temp_dir.path().join("nested").join("overrides.db");

	{
		let adapter = OverrideAdapterSqlite::new(&path).await.expect("Failed to create adapter");
		adapter
			.write_override(&PersistedOverrideRecord::new("ns", "gcb-str-prop", "kept"))
			.await
			.unwrap();
	}

	let adapter = OverrideAdapterSqlite::new(&path).await.expect("Failed to reopen adapter");
	let read = adapter.read_override("ns", "gcb-str-prop").await.unwrap().unwrap();
	assert_eq!(read.value, "kept");
}

// vim: ts=4
