//! Value types and converters for configuration properties

use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace holding instance-wide persisted overrides
pub const GLOBAL_NAMESPACE: &str = "";

/// Closed set of property types.
///
/// Each variant doubles as a named converter from a raw override string to a
/// typed [`ConfigValue`]. Converters are pure, so converting an already-typed
/// value is a no-op (see [`ValueType::coerce`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
	#[serde(rename = "string")]
	String,
	#[serde(rename = "integer")]
	Integer,
	#[serde(rename = "boolean")]
	Boolean,
}

impl ValueType {
	/// Display name used by administration surfaces
	pub fn name(self) -> &'static str {
		match self {
			ValueType::String => "string",
			ValueType::Integer => "integer",
			ValueType::Boolean => "boolean",
		}
	}

	/// Convert a raw override string into a typed value
	pub fn cast(self, raw: &str) -> Result<ConfigValue, CastError> {
		match self {
			ValueType::String => Ok(ConfigValue::String(raw.to_string())),
			ValueType::Integer => raw
				.trim()
				.parse::<i64>()
				.map(ConfigValue::Int)
				.map_err(|err| CastError::new(self, raw, err.to_string())),
			ValueType::Boolean => parse_bool(raw.trim()).map(ConfigValue::Bool).ok_or_else(|| {
				CastError::new(self, raw, "expected true/false, yes/no, on/off or 1/0")
			}),
		}
	}

	/// Convert a typed value into this type.
	///
	/// A value of the right variant is returned unchanged; any other variant
	/// is cast again from its string rendering.
	pub fn coerce(self, value: ConfigValue) -> Result<ConfigValue, CastError> {
		if value.value_type() == self { Ok(value) } else { self.cast(&value.to_string()) }
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

fn parse_bool(raw: &str) -> Option<bool> {
	match raw.to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" | "1" => Some(true),
		"false" | "no" | "off" | "0" => Some(false),
		_ => None,
	}
}

/// Typed property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	String(String),
}

impl ConfigValue {
	pub fn value_type(&self) -> ValueType {
		match self {
			ConfigValue::String(_) => ValueType::String,
			ConfigValue::Int(_) => ValueType::Integer,
			ConfigValue::Bool(_) => ValueType::Boolean,
		}
	}

	/// Get the type name for error messages
	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			ConfigValue::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			ConfigValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			ConfigValue::Bool(b) => Some(*b),
			_ => None,
		}
	}
}

/// Raw-string rendering, the inverse of [`ValueType::cast`]
impl fmt::Display for ConfigValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConfigValue::String(s) => f.write_str(s),
			ConfigValue::Int(i) => write!(f, "{}", i),
			ConfigValue::Bool(b) => write!(f, "{}", b),
		}
	}
}

impl From<&str> for ConfigValue {
	fn from(value: &str) -> Self {
		ConfigValue::String(value.to_string())
	}
}

impl From<String> for ConfigValue {
	fn from(value: String) -> Self {
		ConfigValue::String(value)
	}
}

impl From<i64> for ConfigValue {
	fn from(value: i64) -> Self {
		ConfigValue::Int(value)
	}
}

impl From<i32> for ConfigValue {
	fn from(value: i32) -> Self {
		ConfigValue::Int(i64::from(value))
	}
}

impl From<bool> for ConfigValue {
	fn from(value: bool) -> Self {
		ConfigValue::Bool(value)
	}
}

/// A raw value that does not convert to the requested type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastError {
	pub value_type: ValueType,
	pub raw: String,
	pub reason: String,
}

impl CastError {
	pub fn new(value_type: ValueType, raw: impl Into<String>, reason: impl Into<String>) -> Self {
		Self { value_type, raw: raw.into(), reason: reason.into() }
	}
}

impl fmt::Display for CastError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "cannot cast '{}' to {}: {}", self.raw, self.value_type, self.reason)
	}
}

impl std::error::Error for CastError {}

/// Response envelope of the administrative API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	pub data: T,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		Self { data, total: None }
	}

	pub fn with_total(mut self, total: usize) -> Self {
		self.total = Some(total);
		self
	}
}


// vim: ts=4
