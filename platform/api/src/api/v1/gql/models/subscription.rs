use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;
use crate::database::{self, SubscriptionPlan};

#[derive(SimpleObject, Clone)]
pub struct Subscription {
	pub id: GqlUlid,
	pub plan: SubscriptionPlan,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub cancelled_at: Option<DateTime<Utc>>,
	pub active: bool,
}

impl From<database::Subscription> for Subscription {
	fn from(value: database::Subscription) -> Self {
		Self {
			active: value.is_active_at(Utc::now()),
			id: value.id.into(),
			plan: value.plan,
			starts_at: value.starts_at,
			ends_at: value.ends_at,
			cancelled_at: value.cancelled_at,
		}
	}
}

#[derive(SimpleObject, Clone, Copy)]
pub struct Plan {
	pub plan: SubscriptionPlan,
	pub monthly_price_cents: i64,
	pub booking_discount_percent: u32,
}

impl From<SubscriptionPlan> for Plan {
	fn from(plan: SubscriptionPlan) -> Self {
		Self {
			plan,
			monthly_price_cents: plan.monthly_price_cents(),
			booking_discount_percent: plan.booking_discount_percent(),
		}
	}
}
