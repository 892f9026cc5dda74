use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::SportKind;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Field {
	/// The unique identifier for the field.
	pub id: Ulid,
	/// Foreign key to the owners table.
	pub owner_id: Ulid,
	pub name: String,
	pub description: String,
	pub city: String,
	pub address: String,
	pub sport: SportKind,
	/// Free text, e.g. "artificial turf".
	pub surface: String,
	/// Number of players the field holds, always more than 7.
	pub capacity: i32,
	pub price_per_hour_cents: i64,
	pub indoor: bool,
	pub image_url: Option<String>,
	/// Inactive fields are hidden from customers and cannot be booked.
	pub active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A field together with its review aggregate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatedField {
	#[sqlx(flatten)]
	pub field: Field,
	pub rating_average: Option<f64>,
	pub review_count: i64,
}

impl Field {
	/// Minimum capacity enforced by the schema.
	pub const MIN_CAPACITY: i32 = 8;
}
