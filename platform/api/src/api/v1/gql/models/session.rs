use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use super::ulid::GqlUlid;

#[derive(SimpleObject)]
pub struct Session {
	/// The session's id
	pub id: GqlUlid,
	/// The session's token
	pub token: String,
	/// The customer who owns this session
	pub customer_id: GqlUlid,
	/// Expires at
	pub expires_at: DateTime<Utc>,
	/// Last used at
	pub last_used_at: DateTime<Utc>,
}
