use axum::{
	Router,
	routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/admin/config", get(handler::list_properties))
		.route(
			"/api/admin/config/{name}",
			get(handler::get_property)
				.put(handler::update_override)
				.delete(handler::delete_override),
		)
		.route("/api/admin/overrides", get(handler::list_overrides))
		.route("/api/admin/env/suppressed", get(handler::list_suppressed))
		.route("/api/admin/refresh", post(handler::refresh))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

// vim: ts=4
