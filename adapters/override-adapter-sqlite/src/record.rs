//! Persisted override records
//!
//! Raw override strings keyed by (namespace, name).

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use coursecfg_types::override_store::PersistedOverrideRecord;
use coursecfg_types::prelude::*;

fn from_row(row: &SqliteRow) -> Result<PersistedOverrideRecord, sqlx::Error> {
	Ok(PersistedOverrideRecord {
		namespace: row.try_get("namespace")?,
		name: row.try_get("name")?,
		value: row.try_get("value")?,
		is_draft: row.try_get("is_draft")?,
	})
}

/// Read a single override
pub(crate) async fn read(
	db: &SqlitePool,
	namespace: &str,
	name: &str,
) -> ClResult<Option<PersistedOverrideRecord>> {
	let row = sqlx::query(
		"SELECT namespace, name, value, is_draft FROM config_overrides
		WHERE namespace = ? AND name = ?",
	)
	.bind(namespace)
	.bind(name)
	.fetch_optional(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	row.as_ref()
		.map(from_row)
		.transpose()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// List the overrides of a namespace
pub(crate) async fn list(
	db: &SqlitePool,
	namespace: &str,
) -> ClResult<Vec<PersistedOverrideRecord>> {
	let rows = sqlx::query(
		"SELECT namespace, name, value, is_draft FROM config_overrides
		WHERE namespace = ? ORDER BY name",
	)
	.bind(namespace)
	.fetch_all(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	rows.iter()
		.map(from_row)
		.collect::<Result<Vec<_>, _>>()
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)
}

/// Create or replace an override
pub(crate) async fn write(db: &SqlitePool, record: &PersistedOverrideRecord) -> ClResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO config_overrides (namespace, name, value, is_draft, updated_at)
		VALUES (?, ?, ?, ?, unixepoch())",
	)
	.bind(&record.namespace)
	.bind(&record.name)
	.bind(&record.value)
	.bind(record.is_draft)
	.execute(db)
	.await
	.inspect_err(|err| warn!("DB: {:#?}", err))
	.map_err(|_| Error::DbError)?;

	Ok(())
}

/// Delete an override
pub(crate) async fn delete(db: &SqlitePool, namespace: &str, name: &str) -> ClResult<bool> {
	let res = sqlx::query("DELETE FROM config_overrides WHERE namespace = ? AND name = ?")
		.bind(namespace)
		.bind(name)
		.execute(db)
		.await
		.inspect_err(|err| warn!("DB: {:#?}", err))
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() > 0)
}

// vim: ts=4
