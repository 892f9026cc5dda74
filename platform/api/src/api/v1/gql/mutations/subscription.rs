use async_graphql::{Context, Object};
use chrono::{Months, Utc};
use common::database::Ulid;

use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::require_auth;
use crate::api::v1::gql::models::subscription::Subscription;
use crate::database::{self, SubscriptionPlan};
use crate::global::ApiGlobal;

pub struct SubscriptionMutation<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for SubscriptionMutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> SubscriptionMutation<G> {
	/// Start a plan for the given number of months.
	async fn subscribe(
		&self,
		ctx: &Context<'_>,
		plan: SubscriptionPlan,
		#[graphql(validator(minimum = 1, maximum = 12))] months: u32,
	) -> Result<Subscription> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;
		let now = Utc::now();

		let mut tx = global.db().begin().await?;

		// Serializes concurrent subscribes of the same customer.
		sqlx::query("SELECT id FROM customers WHERE id = $1 FOR UPDATE")
			.bind(auth.customer_id())
			.execute(&mut *tx)
			.await?;

		let active = database::active_subscription(&mut *tx, auth.customer_id(), now).await?;

		if active.is_some() {
			return Err(GqlError::InvalidInput {
				fields: vec!["plan"],
				message: "a subscription is already active",
			}
			.into());
		}

		let ends_at = now
			.checked_add_months(Months::new(months))
			.map_err_gql("failed to compute subscription end")?;

		let subscription: database::Subscription = sqlx::query_as(
			r#"
			INSERT INTO subscriptions (
				id,
				customer_id,
				plan,
				starts_at,
				ends_at
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(auth.customer_id())
		.bind(plan)
		.bind(now)
		.bind(ends_at)
		.fetch_one(&mut *tx)
		.await?;

		tx.commit().await?;

		Ok(subscription.into())
	}

	/// Cancel the running subscription.
	async fn cancel(&self, ctx: &Context<'_>) -> Result<Subscription> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let subscription: database::Subscription = sqlx::query_as(
			r#"
			UPDATE
				subscriptions
			SET
				cancelled_at = $2
			WHERE
				customer_id = $1
				AND cancelled_at IS NULL
				AND starts_at <= $2
				AND ends_at > $2
			RETURNING
				*
			"#,
		)
		.bind(auth.customer_id())
		.bind(Utc::now())
		.fetch_optional(global.db().as_ref())
		.await?
		.map_err_gql(GqlError::NotFound("subscription"))?;

		Ok(subscription.into())
	}
}
