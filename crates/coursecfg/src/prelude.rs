pub use coursecfg_core::prelude::*;

pub use crate::app::App;

// vim: ts=4
