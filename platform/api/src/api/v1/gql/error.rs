use std::panic::Location;
use std::sync::Arc;

use async_graphql::ErrorExtensions;

use crate::api::auth::AuthError;
use crate::booking::ScheduleError;
use crate::setup::SetupError;

pub type Result<T, E = GqlErrorInterface> = std::result::Result<T, E>;

#[derive(Clone)]
pub struct GqlErrorInterface {
	error: GqlError,
	span: tracing::Span,
	location: &'static Location<'static>,
}

impl GqlErrorInterface {
	fn with_location(self, location: &'static Location<'static>) -> Self {
		Self { location, ..self }
	}

	pub fn error(&self) -> &GqlError {
		&self.error
	}
}

impl std::fmt::Debug for GqlErrorInterface {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?} at {}", self.error, self.location)
	}
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum GqlError {
	/// An internal server error occurred.
	#[error("internal server error: {0}")]
	InternalServerError(&'static str),
	/// A database error occurred.
	#[error("database error: {0}")]
	Sqlx(Arc<sqlx::Error>),
	/// The input was invalid.
	#[error("invalid input for {fields:?}: {message}")]
	InvalidInput {
		fields: Vec<&'static str>,
		message: &'static str,
	},
	/// Auth error
	#[error("auth error: {0}")]
	Auth(#[from] AuthError),
	/// Unauthorized
	#[error("unauthorized to see this field: {field}")]
	Unauthorized { field: &'static str },
	/// Not Found
	#[error("{0} not found")]
	NotFound(&'static str),
	/// The requested time window cannot be booked.
	#[error("invalid booking time: {0}")]
	Schedule(#[from] ScheduleError),
}

/// Constraint violations the schema reports for bad input rather than bugs.
fn constraint_error(constraint: &str) -> Option<GqlError> {
	let (fields, message) = match constraint {
		"bookings_no_overlap" => (vec!["startsAt", "endsAt"], "time slot is not available"),
		"reviews_customer_id_field_id_key" => (vec!["fieldId"], "field already reviewed"),
		"customers_email_key" => (vec!["email"], "email already registered"),
		"owners_email_key" => (vec!["email"], "owner email already registered"),
		"services_name_key" => (vec!["name"], "service name already taken"),
		"bookings_field_id_fkey" => (vec!["id"], "field has bookings"),
		"fields_owner_id_fkey" => (vec!["ownerId"], "owner not found"),
		_ => return None,
	};

	Some(GqlError::InvalidInput { fields, message })
}

impl From<sqlx::Error> for GqlError {
	fn from(err: sqlx::Error) -> Self {
		if let Some(error) = err
			.as_database_error()
			.and_then(|e| e.constraint())
			.and_then(constraint_error)
		{
			return error;
		}

		Self::Sqlx(Arc::new(err))
	}
}

impl From<SetupError> for GqlError {
	fn from(err: SetupError) -> Self {
		match err {
			SetupError::Sqlx(err) => err.into(),
			SetupError::Migrate(err) => {
				tracing::error!(err = %err, "failed to run migrations");
				Self::InternalServerError("failed to run migrations")
			}
			SetupError::PasswordHash(_) => Self::InternalServerError("failed to hash password"),
		}
	}
}

impl GqlError {
	pub fn kind(&self) -> &'static str {
		match self {
			GqlError::InternalServerError(_) => "InternalServerError",
			GqlError::Sqlx(_) => "Sqlx",
			GqlError::InvalidInput { .. } => "InvalidInput",
			GqlError::Auth(AuthError::HeaderToStr) => "Auth(HeaderToStr)",
			GqlError::Auth(AuthError::NotBearerToken) => "Auth(NotBearerToken)",
			GqlError::Auth(AuthError::NotLoggedIn) => "Auth(NotLoggedIn)",
			GqlError::Auth(AuthError::InvalidToken) => "Auth(InvalidToken)",
			GqlError::Auth(AuthError::SessionExpired) => "Auth(SessionExpired)",
			GqlError::Auth(AuthError::FetchCustomer) => "Auth(FetchCustomer)",
			GqlError::Auth(AuthError::FetchSession) => "Auth(FetchSession)",
			GqlError::Auth(AuthError::CustomerNotFound) => "Auth(CustomerNotFound)",
			GqlError::Unauthorized { .. } => "Unauthorized",
			GqlError::NotFound(_) => "NotFound",
			GqlError::Schedule(_) => "Schedule",
		}
	}

	pub fn message(&self) -> String {
		match self {
			GqlError::InternalServerError(msg) => msg.to_string(),
			GqlError::InvalidInput { message, .. } => message.to_string(),
			GqlError::Schedule(err) => err.to_string(),
			_ => self.to_string(),
		}
	}

	pub fn fields(&self) -> Vec<&'static str> {
		match self {
			GqlError::InvalidInput { fields, .. } => fields.to_vec(),
			GqlError::Schedule(err) => err.fields(),
			_ => Vec::new(),
		}
	}
}

impl ErrorExtensions for GqlErrorInterface {
	fn extend(&self) -> async_graphql::Error {
		let err = async_graphql::Error::new(self.error.to_string()).extend_with(|_, e| {
			e.set("kind", self.error.kind());
			e.set("reason", self.error.message());
			e.set("fields", self.error.fields());
		});

		match self.error {
			GqlError::InternalServerError(_) | GqlError::Sqlx(_) => {
				self.span.in_scope(|| {
					tracing::error!(
						error = self.error.to_string(),
						location = self.location.to_string(),
						"gql error: {}",
						self.error
					);
				});
			}
			_ => {
				self.span.in_scope(|| {
					tracing::debug!(
						error = self.error.to_string(),
						location = self.location.to_string(),
						"gql error: {}",
						self.error
					);
				});
			}
		}

		err
	}
}

impl<T> From<T> for GqlErrorInterface
where
	GqlError: From<T>,
{
	#[track_caller]
	fn from(value: T) -> Self {
		Self {
			error: GqlError::from(value),
			span: tracing::Span::current(),
			location: Location::caller(),
		}
	}
}

impl From<&'static str> for GqlErrorInterface {
	#[track_caller]
	fn from(msg: &'static str) -> Self {
		Self {
			error: GqlError::InternalServerError(msg),
			span: tracing::Span::current(),
			location: Location::caller(),
		}
	}
}

impl From<GqlErrorInterface> for async_graphql::Error {
	fn from(err: GqlErrorInterface) -> Self {
		err.extend()
	}
}

pub mod ext {
	use std::panic::Location;

	use super::{GqlErrorInterface, Result};

	pub trait ResultExt<T, E>: Sized {
		fn map_err_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>,
			E: std::fmt::Display;

		/// Like [`ResultExt::map_err_gql`], without logging the dropped error.
		fn map_err_ignored_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>;
	}

	impl<T, E> ResultExt<T, E> for std::result::Result<T, E> {
		#[track_caller]
		fn map_err_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>,
			E: std::fmt::Display,
		{
			match self {
				Ok(v) => Ok(v),
				Err(err) => {
					tracing::debug!(err = %err, "mapped error");
					Err(GqlErrorInterface::from(ctx).with_location(Location::caller()))
				}
			}
		}

		#[track_caller]
		fn map_err_ignored_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>,
		{
			match self {
				Ok(v) => Ok(v),
				Err(_) => Err(GqlErrorInterface::from(ctx).with_location(Location::caller())),
			}
		}
	}

	pub trait OptionExt<T>: Sized {
		fn map_err_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>;
	}

	impl<T> OptionExt<T> for std::option::Option<T> {
		#[track_caller]
		fn map_err_gql<C>(self, ctx: C) -> Result<T>
		where
			GqlErrorInterface: From<C>,
		{
			match self {
				Some(v) => Ok(v),
				None => Err(GqlErrorInterface::from(ctx).with_location(Location::caller())),
			}
		}
	}
}
