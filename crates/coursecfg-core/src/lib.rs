//! Configuration properties and their override resolution.
//!
//! A [`ConfigProperty`] is a named, typed, documented value with a default.
//! Its current value is resolved through a precedence chain:
//!
//! 1. a persisted, non-draft override for the requested namespace
//!    (falling back to the global namespace), see [`ConfigService`]
//! 2. a process environment variable with the property's exact name,
//!    see [`EnvOverrides`]
//! 3. the declared default
//!
//! Properties are collected in an explicitly constructed
//! [`PropertyRegistry`] which administration surfaces enumerate.

pub mod env;
pub mod memory_store;
pub mod prelude;
pub mod property;
pub mod registry;
pub mod service;

pub use env::{EnvOverrides, EnvSource, MapEnv, ProcessEnv};
pub use memory_store::InMemoryOverrideStore;
pub use property::{ConfigProperty, Property, PropertyType, Resolved, ValueSource};
pub use registry::PropertyRegistry;
pub use service::{ConfigService, OverrideCache, PropertyInfo};

// vim: ts=4
