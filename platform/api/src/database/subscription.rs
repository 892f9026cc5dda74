use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::SubscriptionPlan;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subscription {
	pub id: Ulid,
	pub customer_id: Ulid,
	pub plan: SubscriptionPlan,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub cancelled_at: Option<DateTime<Utc>>,
}

impl Subscription {
	pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
		self.cancelled_at.is_none() && self.starts_at <= at && at < self.ends_at
	}
}

/// The subscription of `customer_id` running at `at`, if any.
pub async fn active_subscription<'c>(
	db: impl sqlx::PgExecutor<'c>,
	customer_id: Ulid,
	at: DateTime<Utc>,
) -> sqlx::Result<Option<Subscription>> {
	sqlx::query_as(
		r#"
		SELECT
			*
		FROM
			subscriptions
		WHERE
			customer_id = $1
			AND cancelled_at IS NULL
			AND starts_at <= $2
			AND ends_at > $2
		ORDER BY
			ends_at DESC
		LIMIT 1
		"#,
	)
	.bind(customer_id)
	.bind(at)
	.fetch_optional(db)
	.await
}
