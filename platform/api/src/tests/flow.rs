use std::sync::Arc;
use std::time::Duration;

use async_graphql::{Request, Variables};
use chrono::{DateTime, Days, Utc};
use common::context::Handler;
use common::database::Ulid;
use common::global::GlobalDb;
use common::prelude::FutureTimeout;
use serde_json::{json, Value};
use serial_test::serial;

use crate::api::request_context::RequestContext;
use crate::api::v1::gql::ext::RequestExt;
use crate::api::v1::gql::{schema, MySchema};
use crate::config::{AdminConfig, AppConfig};
use crate::global::GlobalState;
use crate::setup::{self, SeedReport};
use crate::tests::global::mock_global_state;

const PASSWORD: &str = "Secret-123";

const CREATE_BOOKING: &str = r#"
	mutation($input: CreateBookingInput!) {
		booking {
			create(input: $input) {
				id
				status
				totalCents
			}
		}
	}
"#;

/// A freshly migrated and seeded database with no accounts.
struct Harness {
	global: Arc<GlobalState>,
	handler: Handler,
	schema: MySchema<GlobalState>,
	seeded: SeedReport,
}

impl Harness {
	async fn new() -> Self {
		let (global, handler) = mock_global_state(AppConfig::default());
		let db = global.db().as_ref();

		setup::migrate(db).await.expect("failed to migrate");
		setup::reset(db).await.expect("failed to reset");
		sqlx::query("DELETE FROM customers")
			.execute(db)
			.await
			.expect("failed to clear customers");

		let seeded = setup::seed(db).await.expect("failed to seed");

		Self {
			global,
			handler,
			schema: schema::<GlobalState>(),
			seeded,
		}
	}

	async fn run(&self, ctx: &RequestContext, query: &str, variables: Value) -> Value {
		let res = self
			.schema
			.execute(
				Request::from(query)
					.variables(Variables::from_json(variables))
					.provide_global(self.global.clone())
					.provide_context(ctx.clone()),
			)
			.timeout(Duration::from_secs(5))
			.await
			.expect("query timed out");

		serde_json::to_value(res).expect("failed to serialize response")
	}

	/// Registers a customer and returns a request context logged in as them.
	async fn register(&self, email: &str) -> RequestContext {
		let ctx = RequestContext::default();

		let res = self
			.run(
				&ctx,
				r#"
				mutation($email: String!, $password: String!) {
					auth {
						register(email: $email, password: $password, fullName: "Jane Doe", phone: "+1 555 0100") {
							token
						}
					}
				}
				"#,
				json!({ "email": email, "password": PASSWORD }),
			)
			.await;
		assert!(res.get("errors").is_none(), "{res}");

		ctx
	}

	async fn login(&self, email: &str) -> RequestContext {
		let ctx = RequestContext::default();

		let res = self
			.run(
				&ctx,
				r#"
				mutation($email: String!, $password: String!) {
					auth {
						login(email: $email, password: $password) {
							token
						}
					}
				}
				"#,
				json!({ "email": email, "password": PASSWORD }),
			)
			.await;
		assert!(res.get("errors").is_none(), "{res}");

		ctx
	}

	/// Creates the configured admin account and logs it in.
	async fn admin(&self) -> RequestContext {
		let config = AdminConfig {
			email: Some("admin@example.com".to_string()),
			password: Some(PASSWORD.to_string()),
		};

		setup::ensure_admin(self.global.db(), &config)
			.await
			.expect("failed to create admin")
			.expect("admin not configured");

		self.login("admin@example.com").await
	}

	/// Id and hourly price of the cheapest active field.
	async fn cheapest_field(&self, ctx: &RequestContext) -> (String, i64) {
		let res = self
			.run(
				ctx,
				"{ fields(filter: { sort: PRICE_ASC, limit: 1 }) { items { id pricePerHourCents } } }",
				json!({}),
			)
			.await;

		let field = &res["data"]["fields"]["items"][0];
		(
			field["id"].as_str().expect("missing field id").to_string(),
			field["pricePerHourCents"].as_i64().expect("missing price"),
		)
	}

	async fn create_booking(&self, ctx: &RequestContext, field_id: &str, starts_at: DateTime<Utc>) -> Value {
		let input = json!({
			"input": {
				"fieldId": field_id,
				"startsAt": starts_at.to_rfc3339(),
				"endsAt": (starts_at + chrono::Duration::hours(1)).to_rfc3339(),
				"fullName": "Jane Doe",
				"phone": "+1 555 0100",
			}
		});

		self.run(ctx, CREATE_BOOKING, input).await
	}

	/// Books an hour and returns the booking id.
	async fn book(&self, ctx: &RequestContext, field_id: &str, starts_at: DateTime<Utc>) -> String {
		let res = self.create_booking(ctx, field_id, starts_at).await;
		assert!(res.get("errors").is_none(), "{res}");

		res["data"]["booking"]["create"]["id"]
			.as_str()
			.expect("missing booking id")
			.to_string()
	}

	async fn pay(&self, ctx: &RequestContext, booking_id: &str) -> Value {
		self.run(
			ctx,
			r#"
			mutation($id: ULID!) {
				payment {
					pay(bookingId: $id, method: CARD) {
						status
						amountCents
					}
				}
			}
			"#,
			json!({ "id": booking_id }),
		)
		.await
	}

	async fn cancel(&self, ctx: &RequestContext, booking_id: &str) -> Value {
		self.run(
			ctx,
			r#"
			mutation($id: ULID!) {
				booking {
					cancel(id: $id) {
						status
						payments { status }
					}
				}
			}
			"#,
			json!({ "id": booking_id }),
		)
		.await
	}

	async fn set_status(&self, ctx: &RequestContext, booking_id: &str, status: &str) -> Value {
		self.run(
			ctx,
			r#"
			mutation($id: ULID!, $status: BookingStatus!) {
				admin {
					updateBookingStatus(id: $id, status: $status) {
						status
					}
				}
			}
			"#,
			json!({ "id": booking_id, "status": status }),
		)
		.await
	}

	async fn table_rows(&self, ctx: &RequestContext) -> Value {
		let res = self
			.run(
				ctx,
				"{ admin { databaseStatus { tables { table rows } latestMigration } } }",
				json!({}),
			)
			.await;
		assert!(res.get("errors").is_none(), "{res}");

		let status = &res["data"]["admin"]["databaseStatus"];
		assert_eq!(status["latestMigration"].as_i64(), Some(20240301000000));

		status["tables"]
			.as_array()
			.expect("missing tables")
			.iter()
			.map(|t| (t["table"].as_str().unwrap_or_default().to_string(), t["rows"].clone()))
			.collect::<serde_json::Map<_, _>>()
			.into()
	}

	async fn shutdown(self) {
		drop(self.schema);
		drop(self.global);
		self.handler
			.cancel()
			.timeout(Duration::from_secs(1))
			.await
			.expect("failed to cancel context");
	}
}

fn tomorrow_at(hour: u32) -> DateTime<Utc> {
	(Utc::now().date_naive() + Days::new(1))
		.and_hms_opt(hour, 0, 0)
		.expect("valid time")
		.and_utc()
}

fn error_kind(res: &Value) -> &Value {
	&res["errors"][0]["extensions"]["kind"]
}

fn error_message(res: &Value) -> &str {
	res["errors"][0]["message"].as_str().unwrap_or_default()
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_booking_flow() {
	let harness = Harness::new().await;
	assert!(harness.seeded.fields > 0);
	assert_eq!(
		setup::seed(harness.global.db()).await.expect("failed to seed"),
		SeedReport::default()
	);

	let ctx = harness.register("Jane@Example.com").await;

	// Registering logs the request context in.
	let res = harness.run(&ctx, "{ me { customer { email } } }", json!({})).await;
	assert_eq!(res["data"]["me"]["customer"]["email"], "jane@example.com");

	let (field_id, price) = harness.cheapest_field(&ctx).await;

	let res = harness.create_booking(&ctx, &field_id, tomorrow_at(10)).await;
	assert!(res.get("errors").is_none(), "{res}");
	let booking = &res["data"]["booking"]["create"];
	assert_eq!(booking["status"], "PENDING");
	assert_eq!(booking["totalCents"].as_i64(), Some(price));
	let booking_id = booking["id"].as_str().expect("missing booking id").to_string();

	let res = harness.create_booking(&ctx, &field_id, tomorrow_at(10)).await;
	assert_eq!(error_kind(&res), "InvalidInput", "{res}");

	let res = harness.pay(&ctx, &booking_id).await;
	assert!(res.get("errors").is_none(), "{res}");
	assert_eq!(res["data"]["payment"]["pay"]["status"], "PAID");
	assert_eq!(res["data"]["payment"]["pay"]["amountCents"].as_i64(), Some(price));

	let res = harness.pay(&ctx, &booking_id).await;
	assert_eq!(error_kind(&res), "InvalidInput", "{res}");
	assert!(error_message(&res).contains("not awaiting payment"), "{res}");

	let res = harness
		.run(&ctx, "{ me { bookings(upcoming: true) { status } } }", json!({}))
		.await;
	assert_eq!(res["data"]["me"]["bookings"], json!([{ "status": "CONFIRMED" }]));

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_cancel_refunds_and_rules() {
	let harness = Harness::new().await;
	let ctx = harness.register("jane@example.com").await;
	let other = harness.register("john@example.com").await;
	let (field_id, _) = harness.cheapest_field(&ctx).await;

	let paid = harness.book(&ctx, &field_id, tomorrow_at(10)).await;
	let res = harness.pay(&ctx, &paid).await;
	assert!(res.get("errors").is_none(), "{res}");

	// Only the booking's customer or an admin may cancel.
	let res = harness.cancel(&other, &paid).await;
	assert_eq!(error_kind(&res), "Unauthorized", "{res}");

	let res = harness.cancel(&ctx, &paid).await;
	assert!(res.get("errors").is_none(), "{res}");
	assert_eq!(
		res["data"]["booking"]["cancel"],
		json!({ "status": "CANCELLED", "payments": [{ "status": "REFUNDED" }] })
	);

	let res = harness.cancel(&ctx, &paid).await;
	assert!(error_message(&res).contains("cannot be cancelled"), "{res}");

	// A cancelled slot can be booked again.
	let pending = harness.book(&ctx, &field_id, tomorrow_at(10)).await;
	let res = harness.cancel(&ctx, &pending).await;
	assert_eq!(res["data"]["booking"]["cancel"]["status"], "CANCELLED", "{res}");

	let started = harness.book(&ctx, &field_id, tomorrow_at(12)).await;
	sqlx::query("UPDATE bookings SET starts_at = NOW() - INTERVAL '1 hour', ends_at = NOW() + INTERVAL '1 hour' WHERE id = $1")
		.bind(started.parse::<Ulid>().expect("invalid booking id"))
		.execute(harness.global.db().as_ref())
		.await
		.expect("failed to move booking");

	let res = harness.cancel(&ctx, &started).await;
	assert!(error_message(&res).contains("already started"), "{res}");

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_one_review_per_field() {
	let harness = Harness::new().await;
	let ctx = harness.register("jane@example.com").await;
	let (field_id, _) = harness.cheapest_field(&ctx).await;

	let review = r#"
		mutation($fieldId: ULID!) {
			review {
				create(fieldId: $fieldId, rating: 4, comment: "Great pitch") {
					rating
					comment
				}
			}
		}
	"#;

	let res = harness.run(&ctx, review, json!({ "fieldId": field_id })).await;
	assert_eq!(
		res["data"]["review"]["create"],
		json!({ "rating": 4, "comment": "Great pitch" }),
		"{res}"
	);

	let res = harness.run(&ctx, review, json!({ "fieldId": field_id })).await;
	assert_eq!(error_kind(&res), "InvalidInput", "{res}");
	assert!(error_message(&res).contains("already reviewed"), "{res}");

	// Another customer still gets their own review.
	let other = harness.register("john@example.com").await;
	let res = harness.run(&other, review, json!({ "fieldId": field_id })).await;
	assert!(res.get("errors").is_none(), "{res}");

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_subscription_discounts_quotes() {
	let harness = Harness::new().await;
	let ctx = harness.register("jane@example.com").await;
	let (field_id, price) = harness.cheapest_field(&ctx).await;

	let quote = r#"
		query($fieldId: ULID!, $startsAt: DateTime!, $endsAt: DateTime!) {
			booking {
				quote(fieldId: $fieldId, startsAt: $startsAt, endsAt: $endsAt) {
					baseCents
					planDiscountCents
					totalCents
				}
			}
		}
	"#;
	let variables = json!({
		"fieldId": field_id,
		"startsAt": tomorrow_at(10).to_rfc3339(),
		"endsAt": tomorrow_at(11).to_rfc3339(),
	});

	let res = harness.run(&ctx, quote, variables.clone()).await;
	assert_eq!(
		res["data"]["booking"]["quote"],
		json!({ "baseCents": price, "planDiscountCents": 0, "totalCents": price }),
		"{res}"
	);

	let subscribe = "mutation { subscription { subscribe(plan: ELITE, months: 1) { plan } } }";

	let res = harness.run(&ctx, subscribe, json!({})).await;
	assert_eq!(res["data"]["subscription"]["subscribe"]["plan"], "ELITE", "{res}");

	let res = harness.run(&ctx, subscribe, json!({})).await;
	assert_eq!(error_kind(&res), "InvalidInput", "{res}");
	assert!(error_message(&res).contains("already active"), "{res}");

	let discount = (price * 20 + 50) / 100;
	let res = harness.run(&ctx, quote, variables).await;
	assert_eq!(
		res["data"]["booking"]["quote"],
		json!({ "baseCents": price, "planDiscountCents": discount, "totalCents": price - discount }),
		"{res}"
	);

	// The booking is priced the same way as the quote.
	let res = harness.create_booking(&ctx, &field_id, tomorrow_at(10)).await;
	assert_eq!(res["data"]["booking"]["create"]["totalCents"].as_i64(), Some(price - discount), "{res}");

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_admin_status_transitions() {
	let harness = Harness::new().await;
	let ctx = harness.register("jane@example.com").await;
	let admin = harness.admin().await;
	let (field_id, _) = harness.cheapest_field(&ctx).await;

	let booking_id = harness.book(&ctx, &field_id, tomorrow_at(10)).await;

	let res = harness.set_status(&ctx, &booking_id, "CONFIRMED").await;
	assert_eq!(error_kind(&res), "Unauthorized", "{res}");

	let res = harness.set_status(&admin, &booking_id, "COMPLETED").await;
	assert_eq!(error_kind(&res), "InvalidInput", "{res}");
	assert!(error_message(&res).contains("cannot move"), "{res}");

	for status in ["CONFIRMED", "COMPLETED"] {
		let res = harness.set_status(&admin, &booking_id, status).await;
		assert_eq!(res["data"]["admin"]["updateBookingStatus"]["status"], status, "{res}");
	}

	for status in ["PENDING", "CONFIRMED", "CANCELLED"] {
		let res = harness.set_status(&admin, &booking_id, status).await;
		assert_eq!(error_kind(&res), "InvalidInput", "{status}: {res}");
	}

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_database_utilities() {
	let harness = Harness::new().await;
	let ctx = harness.register("jane@example.com").await;
	let admin = harness.admin().await;
	let (field_id, _) = harness.cheapest_field(&ctx).await;
	harness.book(&ctx, &field_id, tomorrow_at(10)).await;

	let rows = harness.table_rows(&admin).await;
	assert_eq!(rows["fields"].as_u64(), Some(harness.seeded.fields));
	assert_eq!(rows["bookings"].as_i64(), Some(1));
	assert_eq!(rows["customers"].as_i64(), Some(2));

	let res = harness
		.run(
			&admin,
			r#"mutation { admin { execSql(sql: "UPDATE fields SET description = description; UPDATE owners SET phone = phone") } }"#,
			json!({}),
		)
		.await;
	assert_eq!(
		res["data"]["admin"]["execSql"].as_u64(),
		Some(harness.seeded.fields + harness.seeded.owners),
		"{res}"
	);

	let res = harness.run(&admin, "mutation { admin { resetDatabase } }", json!({})).await;
	assert!(res["data"]["admin"]["resetDatabase"].as_u64().unwrap_or_default() > 0, "{res}");

	// Accounts and sessions survive, so the admin is still logged in.
	let rows = harness.table_rows(&admin).await;
	assert_eq!(rows["fields"].as_i64(), Some(0));
	assert_eq!(rows["bookings"].as_i64(), Some(0));
	assert_eq!(rows["customers"].as_i64(), Some(2));
	assert!(rows["sessions"].as_i64().unwrap_or_default() >= 2);

	let res = harness.run(&ctx, "{ me { customer { email } } }", json!({})).await;
	assert_eq!(res["data"]["me"]["customer"]["email"], "jane@example.com");

	harness.shutdown().await;
}

#[serial]
#[tokio::test]
#[ignore = "requires a postgres database"]
async fn test_serial_search_hides_inactive_fields() {
	let harness = Harness::new().await;
	let ctx = RequestContext::default();
	let admin = harness.admin().await;

	let search = "{ search(query: \"Padel\") { fields { object { name } } offers { object { title fieldId } } } }";

	let res = harness.run(&ctx, search, json!({})).await;
	let offer = &res["data"]["search"]["offers"][0]["object"];
	assert_eq!(offer["title"], "Padel launch week", "{res}");
	let field_id = offer["fieldId"].as_str().expect("missing field id").to_string();

	let res = harness
		.run(
			&admin,
			"mutation($id: ULID!) { admin { setFieldActive(id: $id, active: false) { active } } }",
			json!({ "id": field_id }),
		)
		.await;
	assert_eq!(res["data"]["admin"]["setFieldActive"]["active"], false, "{res}");

	let res = harness.run(&ctx, search, json!({})).await;
	assert_eq!(res["data"]["search"]["offers"], json!([]), "{res}");
	assert!(
		!res["data"]["search"]["fields"]
			.as_array()
			.expect("missing fields")
			.iter()
			.any(|f| f["object"]["name"] == "City Arena Padel Club"),
		"{res}"
	);

	harness.shutdown().await;
}
