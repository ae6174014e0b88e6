//! Registry of declared configuration properties

use parking_lot::RwLock;
use std::{collections::HashMap, sync::Arc};

use crate::prelude::*;
use crate::property::PropertyType;

#[derive(Debug, Default)]
struct RegistryInner {
	/// Names in first-registration order
	order: Vec<String>,
	properties: HashMap<String, Arc<ConfigProperty>>,
}

/// Catalog of every declared property.
///
/// Constructed once at application start and shared through an `Arc`.
/// Registration is meant for the initialization phase but is safe at any time.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
	inner: RwLock<RegistryInner>,
}

impl PropertyRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a property, replacing any previous one with the same name.
	///
	/// A replaced entry keeps its enumeration position. Returns the replaced
	/// property, if any.
	pub fn register(
		&self,
		property: impl Into<Arc<ConfigProperty>>,
	) -> Option<Arc<ConfigProperty>> {
		let property = property.into();
		let mut inner = self.inner.write();

		let name = property.name().to_string();
		let previous = inner.properties.insert(name.clone(), property);
		if previous.is_some() {
			warn!("Property '{}' registered twice; replacing previous declaration", name);
		} else {
			debug!("Registering property: {}", name);
			inner.order.push(name);
		}
		previous
	}

	/// Register a property, failing if the name is already taken
	pub fn try_register(&self, property: impl Into<Arc<ConfigProperty>>) -> ClResult<()> {
		let property = property.into();
		let mut inner = self.inner.write();

		if inner.properties.contains_key(property.name()) {
			return Err(Error::DuplicateProperty(property.name().to_string()));
		}

		debug!("Registering property: {}", property.name());
		inner.order.push(property.name().to_string());
		inner.properties.insert(property.name().to_string(), property);
		Ok(())
	}

	/// Declare a typed property and register it
	pub fn declare<T: PropertyType>(
		&self,
		name: impl Into<String>,
		doc_string: impl Into<String>,
		default: impl Into<ConfigValue>,
	) -> ClResult<Property<T>> {
		let property = Property::<T>::new(name, doc_string, default)?;
		self.register(property.property().clone());
		Ok(property)
	}

	pub fn get(&self, name: &str) -> Option<Arc<ConfigProperty>> {
		self.inner.read().properties.get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.inner.read().properties.contains_key(name)
	}

	/// All properties in registration order
	pub fn all(&self) -> Vec<Arc<ConfigProperty>> {
		let inner = self.inner.read();
		inner.order.iter().filter_map(|name| inner.properties.get(name).cloned()).collect()
	}

	pub fn len(&self) -> usize {
		self.inner.read().properties.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.read().properties.is_empty()
	}

	/// Drop every registration
	pub fn clear(&self) {
		let mut inner = self.inner.write();
		inner.order.clear();
		inner.properties.clear();
	}
}


// vim: ts=4
