use chrono::{DateTime, Utc};
use common::database::Ulid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Review {
	pub id: Ulid,
	pub customer_id: Ulid,
	pub field_id: Ulid,
	/// 1 to 5 stars.
	pub rating: i16,
	pub comment: String,
	pub created_at: DateTime<Utc>,
}

/// Average and count of a field's reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, sqlx::FromRow)]
pub struct RatingSummary {
	pub average: Option<f64>,
	pub count: i64,
}

impl RatingSummary {
	pub fn from_ratings(ratings: impl IntoIterator<Item = i16>) -> Self {
		let (sum, count) = ratings
			.into_iter()
			.fold((0i64, 0i64), |(sum, count), rating| (sum + rating as i64, count + 1));

		Self {
			average: (count > 0).then(|| sum as f64 / count as f64),
			count,
		}
	}
}
