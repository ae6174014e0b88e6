pub use coursecfg_types::prelude::*;

pub use crate::env::EnvOverrides;
pub use crate::property::{ConfigProperty, Property};
pub use crate::registry::PropertyRegistry;
pub use crate::service::ConfigService;

// vim: ts=4
