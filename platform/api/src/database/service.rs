use chrono::{DateTime, Utc};
use common::database::Ulid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Service {
	pub id: Ulid,
	pub name: String,
	pub description: String,
	/// Flat price charged once per booking.
	pub price_cents: i64,
	pub created_at: DateTime<Utc>,
}

/// A service row joined with the field it is attached to.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FieldService {
	pub field_id: Ulid,
	#[sqlx(flatten)]
	pub service: Service,
}
