use chrono::{DateTime, Duration, TimeZone, Utc};
use common::database::Ulid;

use crate::booking::{quote, Quote, TimeWindow};
use crate::database::{Offer, Service, SubscriptionPlan};

fn start() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()
}

fn window(minutes: i64) -> TimeWindow {
	TimeWindow::new(start(), start() + Duration::minutes(minutes))
}

fn service(price_cents: i64) -> Service {
	Service {
		id: Ulid::new(),
		name: format!("service {price_cents}"),
		description: String::new(),
		price_cents,
		created_at: start(),
	}
}

fn offer(discount_percent: i32, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Offer {
	Offer {
		id: Ulid::new(),
		field_id: Ulid::new(),
		title: "spring".to_string(),
		description: String::new(),
		discount_percent,
		starts_at,
		ends_at,
		created_at: start(),
	}
}

#[test]
fn test_quote_base_only() {
	assert_eq!(
		quote(3000, &window(90), &[], None, None),
		Quote {
			base_cents: 4500,
			services_cents: 0,
			offer_discount_cents: 0,
			plan_discount_cents: 0,
			total_cents: 4500,
		}
	);
}

#[test]
fn test_quote_rounds_half_up() {
	// 1001 * 30 / 60 = 500.5
	assert_eq!(quote(1001, &window(30), &[], None, None).base_cents, 501);
	// 1000 * 90 / 60 = 1500
	assert_eq!(quote(1000, &window(90), &[], None, None).base_cents, 1500);
	// 999 * 60 / 60 = 999
	assert_eq!(quote(999, &window(60), &[], None, None).base_cents, 999);
}

#[test]
fn test_quote_composes_discounts() {
	let offer = offer(20, start() - Duration::days(1), start() + Duration::days(1));
	let services = [service(500), service(250)];

	assert_eq!(
		quote(3000, &window(90), &services, Some(&offer), Some(SubscriptionPlan::Premium)),
		Quote {
			base_cents: 4500,
			services_cents: 750,
			offer_discount_cents: 900,
			// 10% of 4500 - 900 + 750
			plan_discount_cents: 435,
			total_cents: 3915,
		}
	);
}

#[test]
fn test_quote_ignores_offer_not_running_at_start() {
	let later = offer(50, start() + Duration::minutes(30), start() + Duration::days(1));
	let ended = offer(50, start() - Duration::days(1), start());

	assert_eq!(quote(3000, &window(60), &[], Some(&later), None).offer_discount_cents, 0);
	assert_eq!(quote(3000, &window(60), &[], Some(&ended), None).offer_discount_cents, 0);

	let started = offer(50, start(), start() + Duration::minutes(1));
	assert_eq!(quote(3000, &window(60), &[], Some(&started), None).offer_discount_cents, 1500);
}

#[test]
fn test_quote_offer_does_not_discount_services() {
	let offer = offer(100, start() - Duration::days(1), start() + Duration::days(1));

	let quote = quote(3000, &window(60), &[service(800)], Some(&offer), Some(SubscriptionPlan::Elite));

	assert_eq!(quote.offer_discount_cents, 3000);
	assert_eq!(quote.plan_discount_cents, 160);
	assert_eq!(quote.total_cents, 640);
}

#[test]
fn test_quote_basic_plan_has_no_discount() {
	let quote = quote(2000, &window(120), &[], None, Some(SubscriptionPlan::Basic));

	assert_eq!(quote.plan_discount_cents, 0);
	assert_eq!(quote.total_cents, 4000);
}

#[test]
fn test_quote_never_negative() {
	let quote = quote(-500, &window(60), &[service(-100)], None, Some(SubscriptionPlan::Elite));

	assert_eq!(quote.base_cents, 0);
	assert_eq!(quote.services_cents, 0);
	assert_eq!(quote.total_cents, 0);
}
