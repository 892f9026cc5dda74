use std::marker::PhantomData;

use async_graphql::{ComplexObject, Context, SimpleObject};
use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::field::Field;
use super::payment::Payment;
use super::service::Service;
use super::ulid::GqlUlid;
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::database::{self, BookingStatus};
use crate::global::ApiGlobal;

#[derive(SimpleObject, Clone)]
pub struct Booker {
	pub id: GqlUlid,
	pub full_name: String,
	pub phone: String,
	pub email: String,
}

impl From<database::Booker> for Booker {
	fn from(value: database::Booker) -> Self {
		Self {
			id: value.id.into(),
			full_name: value.full_name,
			phone: value.phone,
			email: value.email,
		}
	}
}

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Booking<G: ApiGlobal> {
	pub id: GqlUlid,
	pub field_id: GqlUlid,
	pub offer_id: Option<GqlUlid>,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub status: BookingStatus,
	/// Price quoted when the booking was made.
	pub total_cents: i64,
	pub service_ids: Vec<GqlUlid>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,

	#[graphql(skip)]
	pub booker_id: Ulid,
	#[graphql(skip)]
	_phantom: PhantomData<G>,
}

#[ComplexObject]
impl<G: ApiGlobal> Booking<G> {
	async fn field(&self, ctx: &Context<'_>) -> Result<Field<G>> {
		let global = ctx.get_global::<G>();

		global
			.field_by_id_loader()
			.load_one(self.field_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch field")?
			.map_err_gql(GqlError::NotFound("field"))
			.map(Into::into)
	}

	async fn booker(&self, ctx: &Context<'_>) -> Result<Booker> {
		let global = ctx.get_global::<G>();

		let booker: database::Booker = sqlx::query_as("SELECT * FROM bookers WHERE id = $1")
			.bind(self.booker_id)
			.fetch_optional(global.db().as_ref())
			.await?
			.map_err_gql(GqlError::NotFound("booker"))?;

		Ok(booker.into())
	}

	async fn services(&self, ctx: &Context<'_>) -> Result<Vec<Service>> {
		let global = ctx.get_global::<G>();

		let ids = self.service_ids.iter().map(|id| id.to_ulid()).collect::<Vec<_>>();
		let services: Vec<database::Service> = sqlx::query_as("SELECT * FROM services WHERE id = ANY($1) ORDER BY name")
			.bind(ids)
			.fetch_all(global.db().as_ref())
			.await?;

		Ok(services.into_iter().map(Into::into).collect())
	}

	/// Payments made for this booking, newest first.
	async fn payments(&self, ctx: &Context<'_>) -> Result<Vec<Payment>> {
		let global = ctx.get_global::<G>();

		let payments: Vec<database::Payment> =
			sqlx::query_as("SELECT * FROM payments WHERE booking_id = $1 ORDER BY created_at DESC, id DESC")
				.bind(self.id.to_ulid())
				.fetch_all(global.db().as_ref())
				.await?;

		Ok(payments.into_iter().map(Into::into).collect())
	}
}

impl<G: ApiGlobal> From<database::Booking> for Booking<G> {
	fn from(value: database::Booking) -> Self {
		Self {
			id: value.id.into(),
			field_id: value.field_id.into(),
			offer_id: value.offer_id.map(Into::into),
			starts_at: value.starts_at,
			ends_at: value.ends_at,
			status: value.status,
			total_cents: value.total_cents,
			service_ids: value.service_ids.into_iter().map(Into::into).collect(),
			created_at: value.created_at,
			updated_at: value.updated_at,
			booker_id: value.booker_id,
			_phantom: PhantomData,
		}
	}
}
