use std::marker::PhantomData;

use async_graphql::{ComplexObject, Context, SimpleObject};
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;
use crate::api::v1::gql::error::ext::*;
use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::ext::ContextExt;
use crate::database;
use crate::global::ApiGlobal;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Review<G: ApiGlobal> {
	pub id: GqlUlid,
	pub field_id: GqlUlid,
	pub customer_id: GqlUlid,
	pub rating: i16,
	pub comment: String,
	pub created_at: DateTime<Utc>,

	#[graphql(skip)]
	_phantom: PhantomData<G>,
}

#[ComplexObject]
impl<G: ApiGlobal> Review<G> {
	/// Display name of the reviewer.
	async fn author_name(&self, ctx: &Context<'_>) -> Result<Option<String>> {
		let global = ctx.get_global::<G>();

		let customer = global
			.customer_by_id_loader()
			.load_one(self.customer_id.to_ulid())
			.await
			.map_err_ignored_gql("failed to fetch customer")?;

		Ok(customer.map(|c| c.full_name))
	}
}

impl<G: ApiGlobal> From<database::Review> for Review<G> {
	fn from(value: database::Review) -> Self {
		Self {
			id: value.id.into(),
			field_id: value.field_id.into(),
			customer_id: value.customer_id.into(),
			rating: value.rating,
			comment: value.comment,
			created_at: value.created_at,
			_phantom: PhantomData,
		}
	}
}
