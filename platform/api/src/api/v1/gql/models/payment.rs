use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;
use crate::database::{self, PaymentMethod, PaymentStatus};

#[derive(SimpleObject, Clone)]
pub struct Payment {
	pub id: GqlUlid,
	pub booking_id: GqlUlid,
	pub amount_cents: i64,
	pub method: PaymentMethod,
	pub status: PaymentStatus,
	pub created_at: DateTime<Utc>,
	pub paid_at: Option<DateTime<Utc>>,
}

impl From<database::Payment> for Payment {
	fn from(value: database::Payment) -> Self {
		Self {
			id: value.id.into(),
			booking_id: value.booking_id.into(),
			amount_cents: value.amount_cents,
			method: value.method,
			status: value.status,
			created_at: value.created_at,
			paid_at: value.paid_at,
		}
	}
}
