use chrono::{Duration, TimeZone, Utc};
use common::database::Ulid;

use crate::database::{
	hash_password, Customer, CustomerRole, Offer, RatingSummary, Session, Subscription, SubscriptionPlan,
};

fn customer(password: &str) -> Customer {
	let now = Utc::now();

	Customer {
		id: Ulid::new(),
		email: "jane@example.com".to_string(),
		password_hash: hash_password(password).expect("failed to hash password"),
		full_name: "Jane Doe".to_string(),
		phone: "+15550100".to_string(),
		role: CustomerRole::Customer,
		created_at: now,
		updated_at: now,
	}
}

#[test]
fn test_password_hash_round_trip() {
	let mut customer = customer("correct horse 1");

	assert!(customer.verify_password("correct horse 1"));
	assert!(!customer.verify_password("correct horse 2"));

	customer.password_hash = "not a hash".to_string();
	assert!(!customer.verify_password("correct horse 1"));
}

#[test]
fn test_rating_summary() {
	assert_eq!(RatingSummary::from_ratings([]), RatingSummary::default());

	let summary = RatingSummary::from_ratings([5, 4, 4, 2]);
	assert_eq!(summary.count, 4);
	assert_eq!(summary.average, Some(3.75));
}

#[test]
fn test_offer_window_is_half_open() {
	let starts_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
	let offer = Offer {
		id: Ulid::new(),
		field_id: Ulid::new(),
		title: "Summer".to_string(),
		description: String::new(),
		discount_percent: 15,
		starts_at,
		ends_at: starts_at + Duration::days(30),
		created_at: starts_at,
	};

	assert!(!offer.is_active_at(starts_at - Duration::seconds(1)));
	assert!(offer.is_active_at(starts_at));
	assert!(offer.is_active_at(starts_at + Duration::days(29)));
	assert!(!offer.is_active_at(starts_at + Duration::days(30)));
}

#[test]
fn test_subscription_activity() {
	let starts_at = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
	let mut subscription = Subscription {
		id: Ulid::new(),
		customer_id: Ulid::new(),
		plan: SubscriptionPlan::Premium,
		starts_at,
		ends_at: starts_at + Duration::days(31),
		cancelled_at: None,
	};

	assert!(subscription.is_active_at(starts_at));
	assert!(!subscription.is_active_at(starts_at + Duration::days(31)));

	subscription.cancelled_at = Some(starts_at + Duration::days(1));
	assert!(!subscription.is_active_at(starts_at + Duration::days(2)));
}

#[test]
fn test_session_validity() {
	let mut session = Session {
		id: Ulid::new(),
		customer_id: Ulid::new(),
		expires_at: Utc::now() + Duration::hours(1),
		last_used_at: Utc::now(),
	};
	assert!(session.is_valid());

	session.expires_at = Utc::now() - Duration::seconds(1);
	assert!(!session.is_valid());
}
