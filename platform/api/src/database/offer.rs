use chrono::{DateTime, Utc};
use common::database::Ulid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Offer {
	pub id: Ulid,
	pub field_id: Ulid,
	pub title: String,
	pub description: String,
	/// Between 1 and 100.
	pub discount_percent: i32,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,
}

impl Offer {
	/// The offer window is half open, `[starts_at, ends_at)`.
	pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
		self.starts_at <= at && at < self.ends_at
	}
}
