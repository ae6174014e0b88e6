//! Administrative API tests
//!
//! Drives the router in-process with `oneshot` requests.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use axum::{
	Router,
	body::Body,
	http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use coursecfg::{AppBuilder, routes};
use coursecfg_core::{EnvOverrides, InMemoryOverrideStore, MapEnv};

struct TestApp {
	env: Arc<MapEnv>,
	store: Arc<InMemoryOverrideStore>,
	router: Router,
}

fn create_test_app() -> TestApp {
	let env = Arc::new(MapEnv::new());
	let store = Arc::new(InMemoryOverrideStore::new());
	let mut builder = AppBuilder::new();
	builder
		.env(Arc::new(EnvOverrides::new(env.clone())))
		.override_store(store.clone())
		.properties(|registry| {
			registry.declare::<String>("gcb-str-prop", "doc for str_prop", "foo")?;
			registry.declare::<i64>("gcb-int-prop", "doc for int_prop", 123)?;
			Ok(())
		});
	let app = builder.build().expect("Failed to build app");

	TestApp { env, store, router: routes::init(app) }
}

async fn send(
	router: &Router,
	method: &str,
	uri: &str,
	body: Option<Value>,
) -> (StatusCode, Value) {
	let mut request = Request::builder().method(method).uri(uri);
	let body = match body {
		Some(json) => {
			request = request.header(header::CONTENT_TYPE, "application/json");
			Body::from(json.to_string())
		}
		None => Body::empty(),
	};

	let response = router
		.clone()
		.oneshot(request.body(body).expect("Failed to build request"))
		.await
		.expect("Request failed");

	let status = response.status();
	let bytes = response.into_body().collect().await.expect("Failed to read body").to_bytes();
	let json = if bytes.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&bytes).expect("Response is not JSON")
	};
	(status, json)
}

#[tokio::test]
async fn test_list_properties() {
	let app = create_test_app();
	let (status, body) = send(&app.router, "GET", "/api/admin/config", None).await;

	assert_eq!(status, StatusCode::OK);
	let names: Vec<&str> =
		body["data"].as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
	assert!(names.contains(&"gcb-str-prop"));
	assert!(names.contains(&"gcb-int-prop"));
	assert!(names.contains(&"gcb-listen"));
	assert_eq!(body["total"], names.len());
}

#[tokio::test]
async fn test_get_property_reflects_environment() {
	let app = create_test_app();
	let (status, body) = send(&app.router, "GET", "/api/admin/config/gcb-int-prop", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["value"], 123);
	assert_eq!(body["data"]["defaultValue"], 123);
	assert_eq!(body["data"]["valueType"], "integer");
	assert_eq!(body["data"]["docString"], "doc for int_prop");

	app.env.set("gcb-int-prop", "12345");
	let (_, body) = send(&app.router, "GET", "/api/admin/config/gcb-int-prop", None).await;
	assert_eq!(body["data"]["value"], 12345);
	assert_eq!(body["data"]["source"]["kind"], "environment");
}

#[tokio::test]
async fn test_unknown_property_is_not_found() {
	let app = create_test_app();
	let (status, body) = send(&app.router, "GET", "/api/admin/config/gcb-nope", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"]["code"], "E-CFG-NOTFOUND");
}

#[tokio::test]
async fn test_put_and_delete_override() {
	let app = create_test_app();

	let (status, body) = send(
		&app.router,
		"PUT",
		"/api/admin/config/gcb-str-prop",
		Some(json!({ "namespace": "ns_html_hook", "value": "bar" })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["value"], "bar");
	assert_eq!(body["data"]["source"]["namespace"], "ns_html_hook");

	let (_, body) = send(&app.router, "GET", "/api/admin/overrides?ns=ns_html_hook", None).await;
	assert_eq!(body["total"], 1);
	assert_eq!(body["data"][0]["value"], "bar");
	assert_eq!(body["data"][0]["isDraft"], false);

	let (status, body) =
		send(&app.router, "DELETE", "/api/admin/config/gcb-str-prop?ns=ns_html_hook", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["value"], "foo");
}

#[tokio::test]
async fn test_delete_checks_name_without_resolving() {
	let app = create_test_app();

	let (status, body) =
		send(&app.router, "DELETE", "/api/admin/config/gcb-nope?ns=ns_course", None).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["error"]["code"], "E-CFG-NOTFOUND");
	assert_eq!(app.store.read_count(), 0);

	// Only the result is resolved: one read for the namespace, one for the global namespace
	let (status, body) =
		send(&app.router, "DELETE", "/api/admin/config/gcb-str-prop?ns=ns_course", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["value"], "foo");
	assert_eq!(app.store.read_count(), 2);
}

#[tokio::test]
async fn test_put_numeric_and_draft_override() {
	let app = create_test_app();

	let (status, body) = send(
		&app.router,
		"PUT",
		"/api/admin/config/gcb-int-prop",
		Some(json!({ "value": 42 })),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"]["value"], 42);

	let (_, body) = send(
		&app.router,
		"PUT",
		"/api/admin/config/gcb-int-prop",
		Some(json!({ "value": "7", "isDraft": true })),
	)
	.await;
	// The draft replaced the active record and is not applied
	assert_eq!(body["data"]["value"], 123);
}

#[tokio::test]
async fn test_put_invalid_value_is_bad_request() {
	let app = create_test_app();
	let (status, body) = send(
		&app.router,
		"PUT",
		"/api/admin/config/gcb-int-prop",
		Some(json!({ "value": "foo bar" })),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"]["code"], "E-CFG-CAST");
}

#[tokio::test]
async fn test_suppressed_environment_override_is_reported() {
	let app = create_test_app();
	app.env.set("gcb-int-prop", "foo bar");

	let (_, body) = send(&app.router, "GET", "/api/admin/config/gcb-int-prop", None).await;
	assert_eq!(body["data"]["value"], 123);

	let (status, body) = send(&app.router, "GET", "/api/admin/env/suppressed", None).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["data"][0]["name"], "gcb-int-prop");
	assert_eq!(body["data"][0]["value"], "foo bar");
}

#[tokio::test]
async fn test_refresh() {
	let app = create_test_app();
	let (status, body) = send(&app.router, "POST", "/api/admin/refresh", None).await;
	assert_eq!(status, StatusCode::NO_CONTENT);
	assert_eq!(body, Value::Null);
}

// vim: ts=4
