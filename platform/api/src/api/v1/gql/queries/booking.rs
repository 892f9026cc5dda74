use std::sync::Arc;

use async_graphql::{Context, Object};
use chrono::{DateTime, NaiveDate, Utc};
use common::database::Ulid;

use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::api::v1::gql::models::quote::{Quote, TimeSlot};
use crate::api::v1::gql::models::ulid::GqlUlid;
use crate::booking::{self, TimeWindow};
use crate::config::BookingConfig;
use crate::database;
use crate::global::ApiGlobal;

/// A booking request that passed every check, priced for its customer.
pub struct PreparedBooking {
	pub field: database::Field,
	pub window: TimeWindow,
	pub services: Vec<database::Service>,
	pub offer: Option<database::Offer>,
	pub quote: booking::Quote,
}

/// Checks the field, the time window, the services and the offer of a
/// booking request and prices it.
pub async fn prepare<G: ApiGlobal>(
	global: &Arc<G>,
	customer_id: Option<Ulid>,
	field_id: Ulid,
	window: TimeWindow,
	service_ids: &[Ulid],
	offer_id: Option<Ulid>,
) -> Result<PreparedBooking> {
	let now = Utc::now();

	let field = global
		.field_by_id_loader()
		.load_one(field_id)
		.await
		.map_err_ignored_gql("failed to fetch field")?
		.map_err_gql(GqlError::NotFound("field"))?;

	if !field.active {
		return Err(GqlError::InvalidInput {
			fields: vec!["fieldId"],
			message: "field is not available for booking",
		}
		.into());
	}

	booking::validate(&window, global.config::<BookingConfig>(), now)?;

	let available = global
		.services_by_field_loader()
		.load_one(field_id)
		.await
		.map_err_ignored_gql("failed to fetch services")?
		.unwrap_or_default();

	let mut services = Vec::with_capacity(service_ids.len());
	for id in service_ids {
		if services.iter().any(|s: &database::Service| s.id == *id) {
			continue;
		}

		let service = available
			.iter()
			.find(|s| s.id == *id)
			.map_err_gql(GqlError::InvalidInput {
				fields: vec!["serviceIds"],
				message: "service is not offered on this field",
			})?;

		services.push(service.clone());
	}

	let offer = match offer_id {
		Some(offer_id) => {
			let offer: database::Offer = sqlx::query_as("SELECT * FROM offers WHERE id = $1")
				.bind(offer_id)
				.fetch_optional(global.db().as_ref())
				.await?
				.filter(|offer: &database::Offer| offer.field_id == field_id)
				.map_err_gql(GqlError::InvalidInput {
					fields: vec!["offerId"],
					message: "offer does not apply to this field",
				})?;

			Some(offer)
		}
		None => None,
	};

	let plan = match customer_id {
		Some(customer_id) => database::active_subscription(global.db().as_ref(), customer_id, now)
			.await?
			.map(|s| s.plan),
		None => None,
	};

	let quote = booking::quote(field.price_per_hour_cents, &window, &services, offer.as_ref(), plan);

	Ok(PreparedBooking {
		field,
		window,
		services,
		offer,
		quote,
	})
}

pub struct BookingQuery<G: ApiGlobal>(std::marker::PhantomData<G>);

impl<G: ApiGlobal> Default for BookingQuery<G> {
	fn default() -> Self {
		Self(std::marker::PhantomData)
	}
}

#[Object]
impl<G: ApiGlobal> BookingQuery<G> {
	/// Price a prospective booking. Subscription discounts apply when logged in.
	async fn quote(
		&self,
		ctx: &Context<'_>,
		field_id: GqlUlid,
		starts_at: DateTime<Utc>,
		ends_at: DateTime<Utc>,
		service_ids: Option<Vec<GqlUlid>>,
		offer_id: Option<GqlUlid>,
	) -> Result<Quote> {
		let global = ctx.get_global::<G>();
		let customer_id = ctx.get_req_context().auth().await?.map(|auth| auth.customer_id());

		let service_ids = service_ids
			.unwrap_or_default()
			.into_iter()
			.map(GqlUlid::to_ulid)
			.collect::<Vec<_>>();

		let prepared = prepare(
			global,
			customer_id,
			field_id.to_ulid(),
			TimeWindow::new(starts_at, ends_at),
			&service_ids,
			offer_id.map(GqlUlid::to_ulid),
		)
		.await?;

		Ok(prepared.quote.into())
	}

	/// Free slots of a field on the given day (UTC).
	async fn availability(&self, ctx: &Context<'_>, field_id: GqlUlid, date: NaiveDate) -> Result<Vec<TimeSlot>> {
		let global = ctx.get_global::<G>();
		let config = global.config::<BookingConfig>();

		let field = global
			.field_by_id_loader()
			.load_one(field_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
			.filter(|field| field.active)
			.map_err_gql(GqlError::NotFound("field"))?;

		let hours = booking::schedule::opening_hours(date, config);

		let busy: Vec<(DateTime<Utc>, DateTime<Utc>)> = sqlx::query_as(
			r#"
			SELECT
				starts_at,
				ends_at
			FROM
				bookings
			WHERE
				field_id = $1
				AND status IN ('pending', 'confirmed')
				AND starts_at < $3
				AND ends_at > $2
			"#,
		)
		.bind(field.id)
		.bind(hours.starts_at)
		.bind(hours.ends_at)
		.fetch_all(global.db().as_ref())
		.await?;

		let busy = busy
			.into_iter()
			.map(|(starts_at, ends_at)| TimeWindow::new(starts_at, ends_at))
			.collect::<Vec<_>>();

		Ok(booking::free_slots(date, &busy, config).into_iter().map(Into::into).collect())
	}
}
