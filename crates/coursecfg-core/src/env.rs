//! Environment overrides
//!
//! A property is overridden by the environment variable carrying its exact
//! name. Values that fail to cast are remembered in a suppressed set instead
//! of being removed from the environment, so they are reported once and then
//! ignored until the variable changes.

use parking_lot::RwLock;
use std::{collections::HashMap, env::VarError, fmt::Debug, sync::Arc};

use crate::prelude::*;

/// Read access to an environment
///
/// Follows `std::env::var`: a missing variable is `VarError::NotPresent`.
pub trait EnvSource: Debug + Send + Sync {
	fn var(&self, name: &str) -> Result<String, VarError>;
}

/// The real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
	fn var(&self, name: &str) -> Result<String, VarError> {
		std::env::var(name)
	}
}

/// In-memory environment
#[derive(Debug, Default)]
pub struct MapEnv {
	vars: RwLock<HashMap<String, String>>,
}

impl MapEnv {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
		self.vars.write().insert(name.into(), value.into());
	}

	pub fn remove(&self, name: &str) -> Option<String> {
		self.vars.write().remove(name)
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let vars = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
		Self { vars: RwLock::new(vars) }
	}
}

impl EnvSource for MapEnv {
	fn var(&self, name: &str) -> Result<String, VarError> {
		self.vars.read().get(name).cloned().ok_or(VarError::NotPresent)
	}
}

/// Environment override layer with poisoned-value suppression
#[derive(Debug)]
pub struct EnvOverrides {
	source: Arc<dyn EnvSource>,
	/// property name -> raw value that failed to cast
	suppressed: RwLock<HashMap<String, String>>,
}

impl EnvOverrides {
	pub fn new(source: Arc<dyn EnvSource>) -> Self {
		Self { source, suppressed: RwLock::new(HashMap::new()) }
	}

	/// Overrides read from the process environment
	pub fn process() -> Self {
		Self::new(Arc::new(ProcessEnv))
	}

	pub fn source(&self) -> &Arc<dyn EnvSource> {
		&self.source
	}

	/// Look up and cast the override for `property`
	pub fn lookup(&self, property: &ConfigProperty) -> Option<ConfigValue> {
		let name = property.name();
		let raw = match self.source.var(name) {
			Ok(raw) => raw,
			Err(VarError::NotPresent) => {
				self.unsuppress(name);
				return None;
			}
			Err(VarError::NotUnicode(os)) => {
				let raw = os.to_string_lossy().into_owned();
				if !self.is_suppressed_value(name, &raw) {
					warn!("Property {} override is not valid unicode; ignoring override", name);
					self.suppressed.write().insert(name.to_string(), raw);
				}
				return None;
			}
		};

		if self.is_suppressed_value(name, &raw) {
			return None;
		}

		match property.value_type().cast(&raw) {
			Ok(value) => {
				self.unsuppress(name);
				Some(value)
			}
			Err(err) => {
				warn!(
					"Property {} failed to cast to type {}; ignoring override: {}",
					name,
					property.value_type(),
					err
				);
				self.suppressed.write().insert(name.to_string(), raw);
				None
			}
		}
	}

	fn is_suppressed_value(&self, name: &str, raw: &str) -> bool {
		self.suppressed.read().get(name).is_some_and(|bad| bad == raw)
	}

	fn unsuppress(&self, name: &str) {
		if self.suppressed.read().contains_key(name) {
			self.suppressed.write().remove(name);
		}
	}

	pub fn is_suppressed(&self, name: &str) -> bool {
		self.suppressed.read().contains_key(name)
	}

	/// Suppressed overrides as (name, raw value) pairs, ordered by name
	pub fn suppressed(&self) -> Vec<(String, String)> {
		let mut list: Vec<_> =
			self.suppressed.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect();
		list.sort();
		list
	}

	/// Forget suppressed overrides so they are evaluated again
	pub fn clear_suppressed(&self) {
		self.suppressed.write().clear();
	}
}

impl Default for EnvOverrides {
	fn default() -> Self {
		Self::process()
	}
}


// vim: ts=4
