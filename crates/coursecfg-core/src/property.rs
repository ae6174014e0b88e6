//! Configuration property declaration and environment resolution

use serde::Serialize;
use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use crate::prelude::*;

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueSource {
	Persisted { namespace: String },
	Environment,
	Default,
}

/// A resolved value together with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
	pub value: ConfigValue,
	pub source: ValueSource,
}

/// A named, typed and documented configuration value with a default.
///
/// All attributes are fixed at construction. The current value is computed on
/// every read and never stored on the property itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigProperty {
	name: String,
	value_type: ValueType,
	doc_string: String,
	default_value: ConfigValue,
}

impl ConfigProperty {
	/// Declare a property.
	///
	/// `default` is converted through `value_type`; a default that does not
	/// convert is a programming error reported as [`Error::InvalidDefault`].
	pub fn new(
		name: impl Into<String>,
		value_type: ValueType,
		doc_string: impl Into<String>,
		default: impl Into<ConfigValue>,
	) -> ClResult<Self> {
		let name = name.into();
		if name.is_empty() {
			return Err(Error::ConfigError("Property name must not be empty".into()));
		}

		let default_value = value_type
			.coerce(default.into())
			.map_err(|cause| Error::InvalidDefault { name: name.clone(), cause })?;

		Ok(Self { name, value_type, doc_string: doc_string.into(), default_value })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	pub fn doc_string(&self) -> &str {
		&self.doc_string
	}

	pub fn default_value(&self) -> &ConfigValue {
		&self.default_value
	}

	/// Resolve against the environment, falling back to the default
	pub fn resolve(&self, env: &EnvOverrides) -> Resolved {
		match env.lookup(self) {
			Some(value) => Resolved { value, source: ValueSource::Environment },
			None => Resolved { value: self.default_value.clone(), source: ValueSource::Default },
		}
	}

	/// Current value from the environment or the default
	pub fn value(&self, env: &EnvOverrides) -> ConfigValue {
		self.resolve(env).value
	}

	/// Always fails: values change only through override stores
	pub fn set_value(&self, _value: impl Into<ConfigValue>) -> ClResult<()> {
		Err(Error::ReadOnly(self.name.clone()))
	}
}

/// Rust types a [`Property`] handle can produce
pub trait PropertyType: Clone + Debug + Send + Sync + 'static {
	const VALUE_TYPE: ValueType;

	fn from_value(value: ConfigValue) -> Option<Self>;
}

impl PropertyType for String {
	const VALUE_TYPE: ValueType = ValueType::String;

	fn from_value(value: ConfigValue) -> Option<Self> {
		match value {
			ConfigValue::String(s) => Some(s),
			_ => None,
		}
	}
}

impl PropertyType for i64 {
	const VALUE_TYPE: ValueType = ValueType::Integer;

	fn from_value(value: ConfigValue) -> Option<Self> {
		value.as_int()
	}
}

impl PropertyType for bool {
	const VALUE_TYPE: ValueType = ValueType::Boolean;

	fn from_value(value: ConfigValue) -> Option<Self> {
		value.as_bool()
	}
}

/// Typed handle over a shared [`ConfigProperty`]
#[derive(Debug, Clone)]
pub struct Property<T: PropertyType> {
	inner: Arc<ConfigProperty>,
	default: T,
	_type: PhantomData<fn() -> T>,
}

impl<T: PropertyType> Property<T> {
	pub fn new(
		name: impl Into<String>,
		doc_string: impl Into<String>,
		default: impl Into<ConfigValue>,
	) -> ClResult<Self> {
		let property = ConfigProperty::new(name, T::VALUE_TYPE, doc_string, default)?;
		Self::from_property(Arc::new(property))
	}

	/// Wrap an existing property, checking that its type matches `T`
	pub fn from_property(inner: Arc<ConfigProperty>) -> ClResult<Self> {
		let default = T::from_value(inner.default_value().clone()).ok_or_else(|| {
			Error::ConfigError(format!(
				"Property '{}' is of type {}, not {}",
				inner.name(),
				inner.value_type(),
				T::VALUE_TYPE
			))
		})?;
		Ok(Self { inner, default, _type: PhantomData })
	}

	pub fn property(&self) -> &Arc<ConfigProperty> {
		&self.inner
	}

	pub fn name(&self) -> &str {
		self.inner.name()
	}

	pub fn default_value(&self) -> T {
		self.default.clone()
	}

	pub fn value(&self, env: &EnvOverrides) -> T {
		T::from_value(self.inner.value(env)).unwrap_or_else(|| self.default.clone())
	}
}


// vim: ts=4
