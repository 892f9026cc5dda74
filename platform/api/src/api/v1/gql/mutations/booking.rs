use async_graphql::{Context, InputObject, Object};
use chrono::{DateTime, Utc};
use common::database::Ulid;

use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::guards::require_auth;
use crate::api::v1::gql::models::booking::Booking;
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::api::v1::gql::queries::booking::prepare;
use crate::api::v1::gql::validators::{EmailValidator, FullNameValidator, PhoneValidator};
use crate::booking::TimeWindow;
use crate::database::{self, BookingStatus};
use crate::global::ApiGlobal;

#[derive(InputObject)]
pub struct CreateBookingInput {
	pub field_id: GqlUlid,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub service_ids: Option<Vec<GqlUlid>>,
	pub offer_id: Option<GqlUlid>,
	/// Name of the person playing, may differ from the account holder.
	#[graphql(validator(custom = "FullNameValidator"))]
	pub full_name: String,
	#[graphql(validator(custom = "PhoneValidator"))]
	pub phone: String,
	/// Defaults to the account email.
	#[graphql(validator(custom = "EmailValidator"))]
	pub email: Option<String>,
}

/// Locks a booking for the rest of the transaction.
pub(super) async fn lock_booking(tx: &mut sqlx::PgConnection, id: Ulid) -> Result<database::CustomerBooking> {
	sqlx::query_as(
		r#"
		SELECT
			b.*,
			bk.customer_id
		FROM
			bookings b
		INNER JOIN
			bookers bk ON bk.id = b.booker_id
		WHERE
			b.id = $1
		FOR UPDATE OF b
		"#,
	)
	.bind(id)
	.fetch_optional(tx)
	.await?
	.map_err_gql(GqlError::NotFound("booking"))
}

/// Moves a booking to `status`. Cancelling refunds what was paid.
pub(super) async fn set_status(
	tx: &mut sqlx::PgConnection,
	id: Ulid,
	status: BookingStatus,
) -> sqlx::Result<database::Booking> {
	let booking = sqlx::query_as(
		r#"
		UPDATE
			bookings
		SET
			status = $2,
			updated_at = NOW()
		WHERE
			id = $1
		RETURNING
			*
		"#,
	)
	.bind(id)
	.bind(status)
	.fetch_one(&mut *tx)
	.await?;

	if status == BookingStatus::Cancelled {
		sqlx::query("UPDATE payments SET status = 'refunded' WHERE booking_id = $1 AND status = 'paid'")
			.bind(id)
			.execute(&mut *tx)
			.await?;
	}

	Ok(booking)
}

pub struct BookingMutation<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for BookingMutation<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> BookingMutation<G> {
	/// Book a field. The booking waits for payment as `PENDING`.
	async fn create(&self, ctx: &Context<'_>, input: CreateBookingInput) -> Result<Booking<G>> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let service_ids = input
			.service_ids
			.unwrap_or_default()
			.into_iter()
			.map(GqlUlid::to_ulid)
			.collect::<Vec<_>>();

		let prepared = prepare(
			global,
			Some(auth.customer_id()),
			input.field_id.to_ulid(),
			TimeWindow::new(input.starts_at, input.ends_at),
			&service_ids,
			input.offer_id.map(GqlUlid::to_ulid),
		)
		.await?;

		let email = input
			.email
			.map(|email| email.trim().to_lowercase())
			.unwrap_or_else(|| auth.customer.email.clone());

		let mut tx = global.db().begin().await?;

		let booker: database::Booker = sqlx::query_as(
			r#"
			INSERT INTO bookers (
				id,
				customer_id,
				full_name,
				phone,
				email
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5
			)
			ON CONFLICT (customer_id, full_name, phone) DO UPDATE SET
				email = EXCLUDED.email
			RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(auth.customer_id())
		.bind(input.full_name.trim())
		.bind(input.phone.trim())
		.bind(email)
		.fetch_one(&mut *tx)
		.await?;

		// The exclusion constraint catches concurrent inserts, this gives the common case a clean error.
		let taken: bool = sqlx::query_scalar(
			r#"
			SELECT EXISTS(
				SELECT
					1
				FROM
					bookings
				WHERE
					field_id = $1
					AND status IN ('pending', 'confirmed')
					AND starts_at < $3
					AND ends_at > $2
			)
			"#,
		)
		.bind(prepared.field.id)
		.bind(prepared.window.starts_at)
		.bind(prepared.window.ends_at)
		.fetch_one(&mut *tx)
		.await?;

		if taken {
			return Err(GqlError::InvalidInput {
				fields: vec!["startsAt", "endsAt"],
				message: "time slot is not available",
			}
			.into());
		}

		let booking: database::Booking = sqlx::query_as(
			r#"
			INSERT INTO bookings (
				id,
				booker_id,
				field_id,
				offer_id,
				starts_at,
				ends_at,
				status,
				total_cents,
				service_ids
			) VALUES (
				$1,
				$2,
				$3,
				$4,
				$5,
				$6,
				$7,
				$8,
				$9
			) RETURNING *
			"#,
		)
		.bind(Ulid::new())
		.bind(booker.id)
		.bind(prepared.field.id)
		.bind(prepared.offer.as_ref().map(|offer| offer.id))
		.bind(prepared.window.starts_at)
		.bind(prepared.window.ends_at)
		.bind(BookingStatus::Pending)
		.bind(prepared.quote.total_cents)
		.bind(prepared.services.iter().map(|s| s.id).collect::<Vec<_>>())
		.fetch_one(&mut *tx)
		.await?;

		tx.commit().await?;

		tracing::info!(booking_id = %booking.id, field_id = %booking.field_id, "booking created");

		Ok(booking.into())
	}

	/// Cancel a booking that has not started yet. Payments are refunded.
	async fn cancel(&self, ctx: &Context<'_>, id: GqlUlid) -> Result<Booking<G>> {
		let global = ctx.get_global::<G>();
		let auth = require_auth(ctx).await?;

		let mut tx = global.db().begin().await?;

		let current = lock_booking(&mut *tx, id.to_ulid()).await?;

		if current.customer_id != auth.customer_id() && !auth.is_admin() {
			return Err(GqlError::Unauthorized { field: "booking" }.into());
		}

		if !current.booking.status.can_transition_to(BookingStatus::Cancelled) {
			return Err(GqlError::InvalidInput {
				fields: vec!["id"],
				message: "booking cannot be cancelled",
			}
			.into());
		}

		if current.booking.starts_at <= Utc::now() {
			return Err(GqlError::InvalidInput {
				fields: vec!["id"],
				message: "booking has already started",
			}
			.into());
		}

		let booking = set_status(&mut *tx, current.booking.id, BookingStatus::Cancelled).await?;

		tx.commit().await?;

		Ok(booking.into())
	}
}
