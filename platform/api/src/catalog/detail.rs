use chrono::{DateTime, Utc};
use common::database::Ulid;
use sqlx::PgPool;

use crate::database::{Offer, RatingSummary, Review};

/// Offers of every field, newest first. With `active_only` only offers
/// running at `now` are kept.
pub async fn list_offers(db: &PgPool, active_only: bool, now: DateTime<Utc>) -> sqlx::Result<Vec<Offer>> {
	sqlx::query_as(
		r#"
		SELECT
			*
		FROM
			offers
		WHERE
			NOT $1 OR (starts_at <= $2 AND ends_at > $2)
		ORDER BY
			created_at DESC,
			id DESC
		"#,
	)
	.bind(active_only)
	.bind(now)
	.fetch_all(db)
	.await
}

pub async fn field_offers(db: &PgPool, field_id: Ulid, active_only: bool, now: DateTime<Utc>) -> sqlx::Result<Vec<Offer>> {
	sqlx::query_as(
		r#"
		SELECT
			*
		FROM
			offers
		WHERE
			field_id = $1 AND (NOT $2 OR (starts_at <= $3 AND ends_at > $3))
		ORDER BY
			created_at DESC,
			id DESC
		"#,
	)
	.bind(field_id)
	.bind(active_only)
	.bind(now)
	.fetch_all(db)
	.await
}

/// Reviews of a field, newest first.
pub async fn field_reviews(db: &PgPool, field_id: Ulid) -> sqlx::Result<Vec<Review>> {
	sqlx::query_as(
		r#"
		SELECT
			*
		FROM
			reviews
		WHERE
			field_id = $1
		ORDER BY
			created_at DESC,
			id DESC
		"#,
	)
	.bind(field_id)
	.fetch_all(db)
	.await
}

/// Keeps the offers running at `now`, preserving order.
pub fn active_offers(offers: Vec<Offer>, now: DateTime<Utc>) -> Vec<Offer> {
	offers.into_iter().filter(|offer| offer.is_active_at(now)).collect()
}

pub fn rating_summary(reviews: &[Review]) -> RatingSummary {
	RatingSummary::from_ratings(reviews.iter().map(|review| review.rating))
}
