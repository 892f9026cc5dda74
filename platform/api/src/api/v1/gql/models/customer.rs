use std::marker::PhantomData;

use async_graphql::{ComplexObject, Context, SimpleObject};
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;
use crate::api::v1::gql::error::Result;
use crate::api::v1::gql::guards::auth_guard;
use crate::database::{self, CustomerRole};
use crate::global::ApiGlobal;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Customer<G: ApiGlobal> {
	pub id: GqlUlid,
	pub full_name: String,
	pub role: CustomerRole,
	pub created_at: DateTime<Utc>,

	// Private fields
	#[graphql(skip)]
	pub email_: String,
	#[graphql(skip)]
	pub phone_: String,
	#[graphql(skip)]
	_phantom: PhantomData<G>,
}

#[ComplexObject]
impl<G: ApiGlobal> Customer<G> {
	async fn email(&self, ctx: &Context<'_>) -> Result<&str> {
		auth_guard(ctx, "email", self.email_.as_str(), self.id.to_ulid()).await
	}

	async fn phone(&self, ctx: &Context<'_>) -> Result<&str> {
		auth_guard(ctx, "phone", self.phone_.as_str(), self.id.to_ulid()).await
	}
}

impl<G: ApiGlobal> From<database::Customer> for Customer<G> {
	fn from(value: database::Customer) -> Self {
		Self {
			id: value.id.into(),
			full_name: value.full_name,
			role: value.role,
			created_at: value.created_at,
			email_: value.email,
			phone_: value.phone,
			_phantom: PhantomData,
		}
	}
}
