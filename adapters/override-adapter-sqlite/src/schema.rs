//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Overrides
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS config_overrides (
		namespace text NOT NULL,
		name text NOT NULL,
		value text NOT NULL,
		is_draft boolean NOT NULL DEFAULT 0,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(namespace, name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_config_overrides_name ON config_overrides(name)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	Ok(())
}


// vim: ts=4
