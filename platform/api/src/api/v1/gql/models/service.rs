use async_graphql::SimpleObject;

use super::ulid::GqlUlid;
use crate::database;

/// An extra that can be added to a booking for a flat price.
#[derive(SimpleObject, Clone)]
pub struct Service {
	pub id: GqlUlid,
	pub name: String,
	pub description: String,
	pub price_cents: i64,
}

impl From<database::Service> for Service {
	fn from(value: database::Service) -> Self {
		Self {
			id: value.id.into(),
			name: value.name,
			description: value.description,
			price_cents: value.price_cents,
		}
	}
}
