use async_graphql::{Context, Object};
use common::database::Ulid;

use super::booking::{lock_booking, set_status};
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::require_auth;
use crate::api::v1::gql::models::payment::Payment;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::database::{self, BookingStatus, PaymentMethod, PaymentStatus};
use crate::global::ApiGlobal;

pub struct PaymentMutation<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for PaymentMutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> PaymentMutation<G> {
	/// Pay the quoted total of a pending booking, which confirms it. No
	/// payment provider is involved.
	async fn pay(&self, ctx: &Context<'_>, booking_id: GqlUlid, method: PaymentMethod) -> Result<Payment> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let mut tx = global.db().begin().await?;

		let current = lock_booking(&mut *tx, booking_id.to_ulid()).await?;

		if current.customer_id != auth.customer_id() {
			return Err(GqlError::Unauthorized { field: "booking" }.into());
		}

		if current.booking.status != BookingStatus::Pending {
			return Err(GqlError::InvalidInput {
				fields: vec!["bookingId"],
				message: "booking is not awaiting payment",
			}
			.into());
		}

		let payment: database::Payment = sqlx::query_as(
			r#"
			INSERT INTO payments (
				id,
				booking_id,
				amount_cents,
				method,
				status,
				paid_at
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5,
				NOW()
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(current.booking.id)
		.bind(current.booking.total_cents)
		.bind(method)
		.bind(PaymentStatus::Paid)
		.fetch_one(&mut *tx)
		.await?;

		set_status(&mut *tx, current.booking.id, BookingStatus::Confirmed).await?;

		tx.commit().await?;

		tracing::info!(booking_id = %payment.booking_id, amount_cents = payment.amount_cents, "booking paid");

		Ok(payment.into())
	}
}
