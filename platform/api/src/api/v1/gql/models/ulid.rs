use std::ops::Deref;

use async_graphql::{Description, InputValueError, InputValueResult, Scalar, ScalarType, Value};
use common::database::Ulid;

/// A ULID (Universally Unique Lexicographically Sortable Identifier) scalar.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Description)]
pub struct GqlUlid(Ulid);

impl GqlUlid {
	pub fn to_ulid(self) -> Ulid {
		self.0
	}
}

#[Scalar(name = "ULID", specified_by_url = "https://github.com/ulid/spec", use_type_description)]
impl ScalarType for GqlUlid {
	fn parse(value: Value) -> InputValueResult<Self> {
		match value {
			Value::String(s) => match s.parse::<Ulid>() {
				Ok(ulid) => Ok(GqlUlid(ulid)),
				Err(e) => Err(InputValueError::custom(e.to_string())),
			},
			// async-graphql has no 128-bit integers.
			_ => Err(InputValueError::custom("Invalid value")),
		}
	}

	fn to_value(&self) -> Value {
		Value::String(self.0.to_string())
	}
}

impl Deref for GqlUlid {
	type Target = Ulid;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl From<Ulid> for GqlUlid {
	fn from(value: Ulid) -> Self {
		Self(value)
	}
}

impl From<GqlUlid> for Ulid {
	fn from(value: GqlUlid) -> Self {
		value.0
	}
}
