//! App builder - constructs and runs the coursecfg application

use std::sync::Arc;

use coursecfg_types::override_store::OverrideStore;

use crate::core_properties::{self, CoreProperties, DEFAULT_OVERRIDE_CACHE_SIZE};
use crate::prelude::*;
use crate::routes;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Callback declaring the properties of one application module
type RegisterCallback = Box<dyn FnOnce(&PropertyRegistry) -> ClResult<()> + Send>;

#[derive(Debug, Clone)]
pub struct AppOpts {
	pub listen: Box<str>,
	pub override_cache_size: usize,
}

pub struct AppState {
	pub opts: AppOpts,
	pub core: CoreProperties,
	pub config: ConfigService,
}

pub type App = Arc<AppState>;

pub struct AppBuilder {
	listen: Option<Box<str>>,
	override_cache_size: Option<usize>,
	registry: Arc<PropertyRegistry>,
	env: Option<Arc<EnvOverrides>>,
	override_store: Option<Arc<dyn OverrideStore>>,
	on_register: Vec<RegisterCallback>,
}

impl AppBuilder {
	pub fn new() -> Self {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();
		AppBuilder {
			listen: None,
			override_cache_size: None,
			registry: Arc::new(PropertyRegistry::new()),
			env: None,
			override_store: None,
			on_register: Vec::new(),
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.listen = Some(listen.into());
		self
	}
	pub fn override_cache_size(&mut self, size: usize) -> &mut Self {
		self.override_cache_size = Some(size);
		self
	}

	// Collaborators
	pub fn registry(&mut self, registry: Arc<PropertyRegistry>) -> &mut Self {
		self.registry = registry;
		self
	}
	pub fn env(&mut self, env: Arc<EnvOverrides>) -> &mut Self {
		self.env = Some(env);
		self
	}
	pub fn override_store(&mut self, override_store: Arc<dyn OverrideStore>) -> &mut Self {
		self.override_store = Some(override_store);
		self
	}

	/// Register a callback declaring a module's properties
	pub fn properties<F>(&mut self, f: F) -> &mut Self
	where
		F: FnOnce(&PropertyRegistry) -> ClResult<()> + Send + 'static,
	{
		self.on_register.push(Box::new(f));
		self
	}

	pub fn build(self) -> ClResult<App> {
		let env = self.env.unwrap_or_else(|| Arc::new(EnvOverrides::process()));

		let core = core_properties::register_properties(&self.registry)?;
		for register in self.on_register {
			register(&self.registry)?;
		}
		info!("Registered {} configuration properties", self.registry.len());

		let listen = self.listen.unwrap_or_else(|| core.listen.value(&env).into());
		let override_cache_size = self.override_cache_size.unwrap_or_else(|| {
			let size = core.override_cache_size.value(&env);
			usize::try_from(size).unwrap_or_else(|_| {
				warn!(
					"Invalid {} value {}; using {}",
					core_properties::OVERRIDE_CACHE_SIZE,
					size,
					DEFAULT_OVERRIDE_CACHE_SIZE
				);
				DEFAULT_OVERRIDE_CACHE_SIZE
			})
		});

		if self.override_store.is_none() {
			warn!("No override store configured; persisted overrides are disabled");
		}

		let config =
			ConfigService::new(self.registry, env, self.override_store, override_cache_size);

		Ok(Arc::new(AppState { opts: AppOpts { listen, override_cache_size }, core, config }))
	}

	pub async fn run(self) -> ClResult<()> {
		info!("coursecfg V{}", VERSION);

		let app = self.build()?;
		for (name, raw) in app.config.env().suppressed() {
			warn!("Environment override {}={:?} is suppressed", name, raw);
		}

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
