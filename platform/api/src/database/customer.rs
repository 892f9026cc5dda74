use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use common::database::Ulid;

use super::CustomerRole;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
	/// The unique identifier for the customer.
	pub id: Ulid,
	/// Always stored lowercase.
	pub email: String,
	/// The hashed password of the customer. (argon2)
	pub password_hash: String,
	pub full_name: String,
	pub phone: String,
	pub role: CustomerRole,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Customer {
	/// Uses argon2 to verify the password hash against the provided password.
	pub fn verify_password(&self, password: &str) -> bool {
		let hash = match PasswordHash::new(&self.password_hash) {
			Ok(hash) => hash,
			Err(err) => {
				tracing::error!("failed to parse password hash: {}", err);
				return false;
			}
		};

		Argon2::default().verify_password(password.as_bytes(), &hash).is_ok()
	}

	pub fn is_admin(&self) -> bool {
		self.role == CustomerRole::Admin
	}
}

/// Generates a new password hash using argon2.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
	let salt = SaltString::generate(&mut OsRng);

	Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
}
