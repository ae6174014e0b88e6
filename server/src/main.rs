use std::{path::PathBuf, sync::Arc};

use coursecfg::{AppBuilder, core_properties};
use coursecfg_core::{EnvOverrides, PropertyRegistry};
use coursecfg_override_adapter_sqlite::OverrideAdapterSqlite;
use coursecfg_types::prelude::*;

#[tokio::main]
async fn main() -> ClResult<()> {
	let mut app = AppBuilder::new();

	let registry = Arc::new(PropertyRegistry::new());
	let env = Arc::new(EnvOverrides::process());
	let core = core_properties::register_properties(&registry)?;

	let db_dir = PathBuf::from(core.db_dir.value(&env));
	let override_store = OverrideAdapterSqlite::new(db_dir.join("overrides.db"))
		.await
		.inspect_err(|err| error!("FATAL: Cannot open override store: {}", err))?;

	app.registry(registry).env(env).override_store(Arc::new(override_store));
	app.run().await
}

// vim: ts=4
