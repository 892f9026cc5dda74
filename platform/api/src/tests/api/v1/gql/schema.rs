use std::time::Duration;

use async_graphql::Request;
use common::prelude::FutureTimeout;
use serde_json::json;

use crate::api::request_context::RequestContext;
use crate::api::v1::gql::ext::RequestExt;
use crate::api::v1::gql::schema;
use crate::config::AppConfig;
use crate::global::GlobalState;
use crate::tests::global::mock_global_state;

async fn execute(query: &str) -> serde_json::Value {
	let (global, handler) = mock_global_state(AppConfig::default());

	let res = schema::<GlobalState>()
		.execute(
			Request::from(query)
				.provide_global(global.clone())
				.provide_context(RequestContext::default()),
		)
		.timeout(Duration::from_secs(5))
		.await
		.expect("query timed out");

	drop(global);
	handler.cancel().timeout(Duration::from_secs(1)).await.expect("failed to cancel context");

	serde_json::to_value(res).expect("failed to serialize response")
}

#[test]
fn test_schema_exposes_operations() {
	let sdl = schema::<GlobalState>().sdl();

	for name in [
		"fields(",
		"availability(",
		"quote(",
		"search(",
		"plans:",
		"register(",
		"login(",
		"logout(",
		"pay(",
		"subscribe(",
		"createField(",
		"attachService(",
		"updateBookingStatus(",
		"setupDatabase",
		"seedDatabase",
		"resetDatabase",
		"execSql(",
		"databaseStatus",
	] {
		assert!(sdl.contains(name), "schema is missing {name}");
	}
}

#[tokio::test]
async fn test_plans_query() {
	let res = execute("{ plans { plan monthlyPriceCents bookingDiscountPercent } }").await;

	assert!(res.get("errors").is_none(), "{res}");
	assert_eq!(
		res["data"]["plans"],
		json!([
			{ "plan": "BASIC", "monthlyPriceCents": 999, "bookingDiscountPercent": 0 },
			{ "plan": "PREMIUM", "monthlyPriceCents": 1999, "bookingDiscountPercent": 10 },
			{ "plan": "ELITE", "monthlyPriceCents": 3999, "bookingDiscountPercent": 20 },
		])
	);
}

#[tokio::test]
async fn test_me_requires_login() {
	let res = execute("{ me { __typename } }").await;

	assert_eq!(res["data"], serde_json::Value::Null);
	assert_eq!(res["errors"][0]["extensions"]["kind"], "Auth(NotLoggedIn)");
}

#[tokio::test]
async fn test_admin_requires_login() {
	let res = execute("{ admin { __typename } }").await;

	assert_eq!(res["errors"][0]["extensions"]["kind"], "Auth(NotLoggedIn)");
}

#[tokio::test]
async fn test_register_validates_input() {
	let res = execute(
		r#"
		mutation {
			auth {
				register(email: "not-an-email", password: "Secret-123", fullName: "Jane Doe", phone: "5550100") {
					__typename
				}
			}
		}
		"#,
	)
	.await;

	let message = res["errors"][0]["message"].as_str().unwrap_or_default();
	assert!(message.contains("Email is not valid"), "{res}");

	let res = execute(
		r#"
		mutation {
			auth {
				register(email: "jane@example.com", password: "weak", fullName: "Jane Doe", phone: "5550100") {
					__typename
				}
			}
		}
		"#,
	)
	.await;

	let message = res["errors"][0]["message"].as_str().unwrap_or_default();
	assert!(message.contains("at least 8 characters"), "{res}");
}

#[tokio::test]
async fn test_login_rejects_zero_validity() {
	let res = execute(
		r#"
		mutation {
			auth {
				login(email: "jane@example.com", password: "Secret-123", validity: 0) {
					token
				}
			}
		}
		"#,
	)
	.await;

	let message = res["errors"][0]["message"].as_str().unwrap_or_default();
	assert!(message.contains("greater than or equal to 1"), "{res}");
}
