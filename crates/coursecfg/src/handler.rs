//! Administrative configuration handlers

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};

use coursecfg_core::PropertyInfo;
use coursecfg_types::{override_store::PersistedOverrideRecord, types::ApiResponse};

use crate::prelude::*;

/// `?ns=` query parameter; missing means the global namespace
#[derive(Debug, Default, Deserialize)]
pub struct NamespaceQuery {
	#[serde(default)]
	pub ns: String,
}

/// GET /api/admin/config - List all properties with their current values
pub async fn list_properties(
	State(app): State<App>,
	Query(query): Query<NamespaceQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<PropertyInfo>>>)> {
	let properties = app.config.describe_all(&query.ns).await;
	let total = properties.len();

	Ok((StatusCode::OK, Json(ApiResponse::new(properties).with_total(total))))
}

/// GET /api/admin/config/{name} - Get a single property
pub async fn get_property(
	State(app): State<App>,
	Path(name): Path<String>,
	Query(query): Query<NamespaceQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<PropertyInfo>>)> {
	let info = app.config.describe(&query.ns, &name).await?;

	Ok((StatusCode::OK, Json(ApiResponse::new(info))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOverrideRequest {
	#[serde(default)]
	pub namespace: String,
	/// Accepts JSON strings, numbers and booleans; stored in raw string form
	pub value: ConfigValue,
	#[serde(default)]
	pub is_draft: bool,
}

/// PUT /api/admin/config/{name} - Store a persisted override
pub async fn update_override(
	State(app): State<App>,
	Path(name): Path<String>,
	Json(req): Json<UpdateOverrideRequest>,
) -> ClResult<(StatusCode, Json<ApiResponse<PropertyInfo>>)> {
	app.config.set_override(&req.namespace, &name, req.value.to_string(), req.is_draft).await?;

	let info = app.config.describe(&req.namespace, &name).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(info))))
}

/// DELETE /api/admin/config/{name} - Remove a persisted override
pub async fn delete_override(
	State(app): State<App>,
	Path(name): Path<String>,
	Query(query): Query<NamespaceQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<PropertyInfo>>)> {
	// Unknown names are reported before touching the store
	if !app.config.registry().contains(&name) {
		return Err(Error::NotFound);
	}

	if !app.config.delete_override(&query.ns, &name).await? {
		debug!("No override for '{}' in namespace '{}'", name, query.ns);
	}

	let info = app.config.describe(&query.ns, &name).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(info))))
}

/// GET /api/admin/overrides - List persisted overrides of a namespace, drafts included
pub async fn list_overrides(
	State(app): State<App>,
	Query(query): Query<NamespaceQuery>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<PersistedOverrideRecord>>>)> {
	let records = app.config.list_overrides(&query.ns).await?;
	let total = records.len();

	Ok((StatusCode::OK, Json(ApiResponse::new(records).with_total(total))))
}

#[derive(Debug, Serialize)]
pub struct SuppressedOverride {
	pub name: String,
	pub value: String,
}

/// GET /api/admin/env/suppressed - Environment overrides ignored after a failed cast
pub async fn list_suppressed(
	State(app): State<App>,
) -> ClResult<(StatusCode, Json<ApiResponse<Vec<SuppressedOverride>>>)> {
	let list: Vec<_> = app
		.config
		.env()
		.suppressed()
		.into_iter()
		.map(|(name, value)| SuppressedOverride { name, value })
		.collect();
	let total = list.len();

	Ok((StatusCode::OK, Json(ApiResponse::new(list).with_total(total))))
}

/// POST /api/admin/refresh - Drop cached persisted lookups
pub async fn refresh(State(app): State<App>) -> StatusCode {
	app.config.refresh();
	StatusCode::NO_CONTENT
}

// vim: ts=4
