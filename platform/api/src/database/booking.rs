use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::BookingStatus;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Booking {
	pub id: Ulid,
	pub booker_id: Ulid,
	pub field_id: Ulid,
	pub offer_id: Option<Ulid>,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub status: BookingStatus,
	/// Price quoted when the booking was created.
	pub total_cents: i64,
	pub service_ids: Vec<Ulid>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A booking joined with the customer that owns its booker.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomerBooking {
	#[sqlx(flatten)]
	pub booking: Booking,
	pub customer_id: Ulid,
}
