use std::marker::PhantomData;

use async_graphql::{ComplexObject, Context, SimpleObject};
use chrono::{DateTime, Utc};

use super::field::Field;
use super::ulid::GqlUlid;
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::{GqlError, Result};
use crate::api::v1::gql::ext::ContextExt;
use crate::database;
use crate::global::ApiGlobal;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Offer<G: ApiGlobal> {
	pub id: GqlUlid,
	pub field_id: GqlUlid,
	pub title: String,
	pub description: String,
	pub discount_percent: i32,
	pub starts_at: DateTime<Utc>,
	pub ends_at: DateTime<Utc>,
	pub created_at: DateTime<Utc>,

	#[graphql(skip)]
	_phantom: PhantomData<G>,
}

#[ComplexObject]
impl<G: ApiGlobal> Offer<G> {
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

	/// Whether the offer is running right now.
	async fn active(&self) -> bool {
		let now = Utc::now();
		self.starts_at <= now && now < self.ends_at
	}
}

impl<G: ApiGlobal> From<database::Offer> for Offer<G> {
	fn from(value: database::Offer) -> Self {
		Self {
			id: value.id.into(),
			field_id: value.field_id.into(),
			title: value.title,
			description: value.description,
			discount_percent: value.discount_percent,
			starts_at: value.starts_at,
			ends_at: value.ends_at,
			created_at: value.created_at,
			_phantom: PhantomData,
		}
	}
}
