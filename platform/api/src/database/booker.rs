use common::database::Ulid;

/// The person a booking is made for. A customer may book for several people,
/// each is stored once per `(full_name, phone)`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Booker {
	pub id: Ulid,
	pub customer_id: Ulid,
	pub full_name: String,
	pub phone: String,
	pub email: String,
}
