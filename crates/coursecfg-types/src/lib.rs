//! Shared types, the override store trait, and the error type for coursecfg.
//!
//! This crate holds everything the core registry, the application crate and
//! the storage adapters need to agree on. Keeping it separate lets adapter
//! crates build without pulling in the resolution logic.

pub mod error;
pub mod override_store;
pub mod prelude;
pub mod types;

// vim: ts=4
