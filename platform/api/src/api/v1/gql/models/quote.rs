use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use crate::booking::{self, TimeWindow};
use crate::database::RatingSummary;

/// Price breakdown of a prospective booking, in cents.
#[derive(SimpleObject, Clone, Copy)]
pub struct Quote {
	pub base_cents: i64,
	pub services_cents: i64,
	pub offer_discount_cents: i64,
	pub plan_discount_cents: i64,
	pub total_cents: i64,
}

impl From<booking::Quote> for Quote {
	fn from(value: booking::Quote) -> Self {
		Self {
			base_cents: value.base_cents,
			services_cents: value.services_cents,
			offer_discount_cents: value.offer_discount_cents,
			plan_discount_cents: value.plan_discount_cents,
			total_cents: value.total_cents,
		}
	}
}

#[derive(SimpleObject, Clone, Copy)]
pub struct TimeSlot {
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
}

impl From<TimeWindow> for TimeSlot {
	fn from(value: TimeWindow) -> Self {
		Self {
			starts_at: value.starts_at,
			ends_at: value.ends_at,
		}
	}
}

#[derive(SimpleObject, Clone, Copy)]
pub struct Rating {
	/// Absent when the field has no reviews.
	pub average: Option<f64>,
	pub count: i64,
}

impl From<RatingSummary> for Rating {
	fn from(value: RatingSummary) -> Self {
		Self {
			average: value.average,
			count: value.count,
		}
	}
}
