use std::marker::PhantomData;

use async_graphql::{ComplexObject, Context, InputObject, SimpleObject};
use chrono::{DateTime, Utc};

use super::offer::Offer;
use super::owner::Owner;
use super::quote::Rating;
use super::review::Review;
use super::service::Service;
use super::ulid::GqlUlid;
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::catalog::{detail, FieldFilter, FieldSort};
use crate::database::{self, SportKind};
use crate::global::ApiGlobal;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Field<G: ApiGlobal> {
	pub id: GqlUlid,
	pub owner_id: GqlUlid,
	pub name: String,
	pub description: String,
	pub city: String,
	pub address: String,
	pub sport: SportKind,
	pub surface: String,
	pub capacity: i32,
	pub price_per_hour_cents: i64,
	pub indoor: bool,
	pub image_url: Option<String>,
	pub active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,

	#[graphql(skip)]
	_phantom: PhantomData<G>,
}

#[ComplexObject]
impl<G: ApiGlobal> Field<G> {
	async fn owner(&self, ctx: &Context<'_>) -> Result<Owner> {
		let global = ctx.get_global::<G>();

		global
			.owner_by_id_loader()
			.load_one(self.owner_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch owner")?
			.map_err_gql(GqlError::NotFound("owner"))
			.map(Into::into)
	}

	/// Services that can be added to a booking of this field.
	async fn services(&self, ctx: &Context<'_>) -> Result<Vec<Service>> {
		let global = ctx.get_global::<G>();

		let services = global
			.services_by_field_loader()
			.load_one(self.id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch services")?
			.unwrap_or_default();

		Ok(services.into_iter().map(Into::into).collect())
	}

	/// Offers of this field, newest first. Only running offers unless
	/// `activeOnly` is false.
	async fn offers(&self, ctx: &Context<'_>, active_only: Option<bool>) -> Result<Vec<Offer<G>>> {
		let global = ctx.get_global::<G>();

		let offers = detail::field_offers(global.db(), self.id.to_ulid(), active_only.unwrap_or(true), Utc::now()).await?;

		Ok(offers.into_iter().map(Into::into).collect())
	}

	/// Reviews of this field, newest first.
	async fn reviews(&self, ctx: &Context<'_>) -> Result<Vec<Review<G>>> {
		let global = ctx.get_global::<G>();

		let reviews = detail::field_reviews(global.db(), self.id.to_ulid()).await?;

		Ok(reviews.into_iter().map(Into::into).collect())
	}

	async fn rating(&self, ctx: &Context<'_>) -> Result<Rating> {
		let global = ctx.get_global::<G>();

		let rating = global
			.rating_by_field_loader()
			.load_one(self.id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch rating")?
			.unwrap_or_default();

		Ok(rating.into())
	}
}

impl<G: ApiGlobal> From<database::Field> for Field<G> {
	fn from(value: database::Field) -> Self {
		Self {
			id: value.id.into(),
			owner_id: value.owner_id.into(),
			name: value.name,
			description: value.description,
			city: value.city,
			address: value.address,
			sport: value.sport,
			surface: value.surface,
			capacity: value.capacity,
			price_per_hour_cents: value.price_per_hour_cents,
			indoor: value.indoor,
			image_url: value.image_url,
			active: value.active,
			created_at: value.created_at,
			updated_at: value.updated_at,
			_phantom: PhantomData,
		}
	}
}

#[derive(SimpleObject)]
pub struct FieldPage<G: ApiGlobal> {
	pub items: Vec<Field<G>>,
	/// Number of matching fields before pagination.
	pub total: u64,
}

/// Browse filters. Unset predicates match everything.
#[derive(InputObject, Default)]
pub struct FieldFilterInput {
	/// Matches name, city, address or description.
	pub query: Option<String>,
	pub city: Option<String>,
	pub sport: Option<SportKind>,
	pub min_price_cents: Option<i64>,
	pub max_price_cents: Option<i64>,
	pub min_capacity: Option<i32>,
	pub indoor: Option<bool>,
	/// Ignored unless the caller is an admin.
	pub include_inactive: Option<bool>,
	pub sort: Option<FieldSort>,
	#[graphql(validator(minimum = 1, maximum = 100))]
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

impl FieldFilterInput {
	pub fn into_filter(self, is_admin: bool) -> FieldFilter {
		FieldFilter {
			query: self.query,
			city: self.city,
			sport: self.sport,
			min_price_cents: self.min_price_cents,
			max_price_cents: self.max_price_cents,
			min_capacity: self.min_capacity,
			indoor: self.indoor,
			include_inactive: is_admin && self.include_inactive.unwrap_or(false),
			sort: self.sort.unwrap_or_default(),
			limit: self.limit,
			offset: self.offset.unwrap_or_default(),
		}
	}
}
