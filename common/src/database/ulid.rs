use std::str::FromStr;

use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type};

/// A ULID stored in Postgres as a `UUID`.
///
/// ULIDs sort by creation time, which keeps primary key indexes append-mostly
/// and lets us derive a creation timestamp from any id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Ulid(pub ulid::Ulid);

impl Ulid {
	pub fn new() -> Self {
		Self(ulid::Ulid::new())
	}

	pub const fn nil() -> Self {
		Self(ulid::Ulid::nil())
	}
}

impl Default for Ulid {
	fn default() -> Self {
		Self::nil()
	}
}

impl std::fmt::Display for Ulid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl std::fmt::Debug for Ulid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Ulid({})", self.0)
	}
}

impl FromStr for Ulid {
	type Err = ulid::DecodeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ulid::Ulid::from_string(s).map(Self)
	}
}

impl Type<Postgres> for Ulid {
	fn type_info() -> PgTypeInfo {
		<uuid::Uuid as Type<Postgres>>::type_info()
	}
}

impl PgHasArrayType for Ulid {
	fn array_type_info() -> PgTypeInfo {
		<uuid::Uuid as PgHasArrayType>::array_type_info()
	}
}

impl Decode<'_, Postgres> for Ulid {
	fn decode(value: PgValueRef<'_>) -> Result<Self, sqlx::error::BoxDynError> {
		let id = <uuid::Uuid as Decode<'_, Postgres>>::decode(value)?;
		Ok(Self::from(id))
	}
}

impl Encode<'_, Postgres> for Ulid {
	fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> sqlx::encode::IsNull {
		<uuid::Uuid as Encode<'_, Postgres>>::encode_by_ref(&uuid::Uuid::from(*self), buf)
	}
}

impl From<Ulid> for ulid::Ulid {
	fn from(id: Ulid) -> Self {
		id.0
	}
}

impl From<ulid::Ulid> for Ulid {
	fn from(id: ulid::Ulid) -> Self {
		Self(id)
	}
}

impl From<uuid::Uuid> for Ulid {
	fn from(id: uuid::Uuid) -> Self {
		Self(ulid::Ulid::from(id))
	}
}

impl From<Ulid> for uuid::Uuid {
	fn from(id: Ulid) -> Self {
		id.0.into()
	}
}
