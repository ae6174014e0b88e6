//! coursecfg application crate.
//!
//! Wires the property registry, the environment and an optional persisted
//! override store into a [`ConfigService`](coursecfg_core::ConfigService)
//! and serves the administrative API on top of it.

pub mod app;
pub mod core_properties;
pub mod handler;
pub mod prelude;
pub mod routes;

pub use app::{App, AppBuilder, AppOpts, AppState, VERSION};

// vim: ts=4
