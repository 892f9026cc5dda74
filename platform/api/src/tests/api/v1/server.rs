use std::time::Duration;

use common::prelude::FutureTimeout;
use hyper::header;
use serde_json::{json, Value};
use serial_test::serial;

use crate::api;
use crate::config::{ApiConfig, ApiExtConfig, AppConfig};
use crate::tests::global::mock_global_state;

#[serial]
#[tokio::test]
async fn test_serial_http_routes() {
	let port = portpicker::pick_unused_port().expect("failed to pick port");
	let (global, handler) = mock_global_state(AppConfig {
		extra: ApiExtConfig {
			api: ApiConfig {
				bind_address: format!("127.0.0.1:{port}").parse().expect("failed to parse address"),
				tls: None,
			},
			..Default::default()
		},
		..Default::default()
	});

	let server = tokio::spawn(api::run(global.clone()));

	// Wait for the listener.
	tokio::time::sleep(Duration::from_millis(300)).await;

	let base = format!("http://127.0.0.1:{port}");
	let client = reqwest::Client::new();

	let resp = client
		.get(format!("{base}/v1/health"))
		.send()
		.await
		.expect("failed to get health");
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	assert_eq!(resp.headers().get("access-control-allow-origin").map(|v| v.as_bytes()), Some(&b"*"[..]));
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body, json!({ "status": "ok" }));

	let resp = client
		.get(format!("{base}/does/not/exist"))
		.send()
		.await
		.expect("failed to send request");
	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body, json!({ "error": "not_found" }));

	let resp = client
		.post(format!("{base}/v1/gql"))
		.json(&json!({ "query": "{ plans { plan monthlyPriceCents } }" }))
		.send()
		.await
		.expect("failed to query gql");
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	let body: Value = resp.json().await.expect("failed to read body");
	assert_eq!(body["data"]["plans"][1], json!({ "plan": "PREMIUM", "monthlyPriceCents": 1999 }));
	assert!(body.get("errors").is_none());

	let resp = client
		.get(format!("{base}/v1/gql"))
		.query(&[("query", "{ plans { plan } }")])
		.send()
		.await
		.expect("failed to query gql");
	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	let resp = client
		.post(format!("{base}/v1/gql"))
		.header(header::CONTENT_TYPE.as_str(), "application/json")
		.body("{ not json")
		.send()
		.await
		.expect("failed to query gql");
	assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

	for authorization in ["Bearer garbage", "Basic dXNlcjpwYXNz"] {
		let resp = client
			.get(format!("{base}/v1/health"))
			.header(header::AUTHORIZATION.as_str(), authorization)
			.send()
			.await
			.expect("failed to get health");
		assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED, "{authorization}");
		let body: Value = resp.json().await.expect("failed to read body");
		assert_eq!(body["success"], json!(false));
	}

	let resp = client
		.get(format!("{base}/v1/gql/playground"))
		.send()
		.await
		.expect("failed to get playground");
	assert_eq!(resp.status(), reqwest::StatusCode::OK);
	assert!(resp.text().await.expect("failed to read body").contains("Fieldbook"));

	drop(global);
	drop(client);

	handler
		.cancel()
		.timeout(Duration::from_secs(1))
		.await
		.expect("failed to cancel context");

	server
		.timeout(Duration::from_secs(1))
		.await
		.expect("server did not stop")
		.expect("server panicked")
		.expect("server failed");
}
