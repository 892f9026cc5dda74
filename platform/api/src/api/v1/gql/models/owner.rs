use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;
use crate::database;

#[derive(SimpleObject, Clone)]
pub struct Owner {
	pub id: GqlUlid,
	pub name: String,
	pub email: String,
	pub phone: String,
	pub created_at: DateTime<Utc>,
}

impl From<database::Owner> for Owner {
	fn from(value: database::Owner) -> Self {
		Self {
			id: value.id.into(),
			name: value.name,
			email: value.email,
			phone: value.phone,
			created_at: value.created_at,
		}
	}
}
