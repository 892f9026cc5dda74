use chrono::{DateTime, Utc};
use common::database::Ulid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Owner {
	pub id: Ulid,
	pub name: String,
	pub email: String,
	pub phone: String,
	pub created_at: DateTime<Utc>,
}
