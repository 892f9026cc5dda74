use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Payment {
	pub id: Ulid,
	pub booking_id: Ulid,
	pub amount_cents: i64,
	pub method: PaymentMethod,
	pub status: PaymentStatus,
	pub created_at: DateTime<Utc>,
	pub paid_at: Option<DateTime<Utc>>,
}
