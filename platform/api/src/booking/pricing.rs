use super::TimeWindow;
use crate::database::{Offer, Service, SubscriptionPlan};

/// Price breakdown of a booking, all amounts in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quote {
	pub base_cents: i64,
	pub services_cents: i64,
	pub offer_discount_cents: i64,
	pub plan_discount_cents: i64,
	pub total_cents: i64,
}

/// `numerator / denominator` rounded half up, for non-negative inputs.
fn div_round(numerator: i64, denominator: i64) -> i64 {
	(numerator + denominator / 2) / denominator
}

fn percent_of(amount: i64, percent: i64) -> i64 {
	div_round(amount.max(0) * percent.clamp(0, 100), 100)
}

/// The offer discounts the field time only and only when the booking starts
/// inside the offer window. The plan discount applies to everything left.
pub fn quote(
	price_per_hour_cents: i64,
	window: &TimeWindow,
	services: &[Service],
	offer: Option<&Offer>,
	plan: Option<SubscriptionPlan>,
) -> Quote {
	let minutes = window.minutes().max(0);
	let base_cents = div_round(price_per_hour_cents.max(0) * minutes, 60);

	let services_cents = services.iter().map(|s| s.price_cents.max(0)).sum::<i64>();

	let offer_discount_cents = offer
		.filter(|offer| offer.is_active_at(window.starts_at))
		.map(|offer| percent_of(base_cents, offer.discount_percent as i64))
		.unwrap_or_default();

	let plan_discount_cents = plan
		.map(|plan| {
			percent_of(
				base_cents - offer_discount_cents + services_cents,
				plan.booking_discount_percent() as i64,
			)
		})
		.unwrap_or_default();

	Quote {
		base_cents,
		services_cents,
		offer_discount_cents,
		plan_discount_cents,
		total_cents: (base_cents - offer_discount_cents + services_cents - plan_discount_cents).max(0),
	}
}
