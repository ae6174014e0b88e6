//! SQLite persisted override store

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use coursecfg_types::override_store::{OverrideStore, PersistedOverrideRecord};
use coursecfg_types::prelude::*;

mod record;
mod schema;

use schema::init_db;

#[derive(Debug)]
pub struct OverrideAdapterSqlite {
	db: SqlitePool,
}

impl OverrideAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		if let Some(parent) = path.as_ref().parent() {
			if !parent.as_os_str().is_empty() {
				tokio::fs::create_dir_all(parent).await?;
			}
		}

		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| warn!("DbError: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("Override store opened at {}", path.as_ref().display());
		Ok(Self { db })
	}
}

#[async_trait]
impl OverrideStore for OverrideAdapterSqlite {
	async fn read_override(
		&self,
		namespace: &str,
		name: &str,
	) -> ClResult<Option<PersistedOverrideRecord>> {
		record::read(&self.db, namespace, name).await
	}

	async fn list_overrides(&self, namespace: &str) -> ClResult<Vec<PersistedOverrideRecord>> {
		record::list(&self.db, namespace).await
	}

	async fn write_override(&self, rec: &PersistedOverrideRecord) -> ClResult<()> {
		record::write(&self.db, rec).await
	}

	async fn delete_override(&self, namespace: &str, name: &str) -> ClResult<bool> {
		record::delete(&self.db, namespace, name).await
	}
}

// vim: ts=4
