use crate::database::{BookingStatus, SubscriptionPlan};

#[test]
fn test_booking_status_transitions() {
	use BookingStatus::*;

	let all = [Pending, Confirmed, Cancelled, Completed];
	let allowed = [
		(Pending, Confirmed),
		(Pending, Cancelled),
		(Confirmed, Completed),
		(Confirmed, Cancelled),
	];

	for from in all {
		for to in all {
			assert_eq!(
				from.can_transition_to(to),
				allowed.contains(&(from, to)),
				"{from:?} -> {to:?}"
			);
		}
	}
}

#[test]
fn test_terminal_statuses_release_slot() {
	assert!(BookingStatus::Pending.holds_slot());
	assert!(BookingStatus::Confirmed.holds_slot());
	assert!(!BookingStatus::Cancelled.holds_slot());
	assert!(!BookingStatus::Completed.holds_slot());
}

#[test]
fn test_plan_pricing() {
	let prices = SubscriptionPlan::ALL.map(SubscriptionPlan::monthly_price_cents);
	assert_eq!(prices, [999, 1999, 3999]);

	let discounts = SubscriptionPlan::ALL.map(SubscriptionPlan::booking_discount_percent);
	assert_eq!(discounts, [0, 10, 20]);
}
