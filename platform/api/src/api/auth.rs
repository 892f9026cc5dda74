use std::sync::Arc;

use common::database::Ulid;
use common::http::RouteError;
use hyper::StatusCode;

use super::error::ApiError;
use crate::database::{Customer, Session};
use crate::global::ApiGlobal;

#[derive(thiserror::Error, Debug, Clone)]
pub enum AuthError {
	#[error("token must be ascii only")]
	HeaderToStr,
	#[error("token must be a bearer token")]
	NotBearerToken,
	#[error("not logged in")]
	NotLoggedIn,
	#[error("invalid token")]
	InvalidToken,
	#[error("session expired")]
	SessionExpired,
	#[error("failed to fetch customer")]
	FetchCustomer,
	#[error("failed to fetch session")]
	FetchSession,
	#[error("customer not found")]
	CustomerNotFound,
}

impl From<AuthError> for RouteError<ApiError> {
	fn from(value: AuthError) -> Self {
		RouteError::from(match &value {
			AuthError::HeaderToStr => (StatusCode::BAD_REQUEST, "token must be ascii only"),
			AuthError::NotBearerToken => (StatusCode::UNAUTHORIZED, "token must be a bearer token"),
			AuthError::NotLoggedIn => (StatusCode::UNAUTHORIZED, "not logged in"),
			AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
			AuthError::SessionExpired => (StatusCode::UNAUTHORIZED, "session expired"),
			AuthError::FetchCustomer => (StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch customer"),
			AuthError::FetchSession => (StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch session"),
			AuthError::CustomerNotFound => (StatusCode::UNAUTHORIZED, "customer not found"),
		})
		.with_source(Some(ApiError::Auth(value)))
	}
}

/// The authenticated caller of a request.
#[derive(Debug, Clone)]
pub struct AuthData {
	pub session: Session,
	pub customer: Customer,
}

impl AuthData {
	pub fn customer_id(&self) -> Ulid {
		self.customer.id
	}

	pub fn is_admin(&self) -> bool {
		self.customer.is_admin()
	}

	pub async fn from_session<G: ApiGlobal>(global: &Arc<G>, session: Session) -> Result<Self, AuthError> {
		let customer = global
			.customer_by_id_loader()
			.load_one(session.customer_id)
			.await
			.map_err(|_| AuthError::FetchCustomer)?
			.ok_or(AuthError::CustomerNotFound)?;

		Ok(Self { session, customer })
	}

	/// Loads a session that is still valid, marks it as used and builds the
	/// auth data for it.
	pub async fn from_session_id<G: ApiGlobal>(global: &Arc<G>, session_id: Ulid) -> Result<Self, AuthError> {
		let session: Session = sqlx::query_as(
			r#"
			UPDATE
				sessions
			SET
				last_used_at = NOW()
			WHERE
				id = $1 AND expires_at > NOW()
			RETURNING
				*
			"#,
		)
		.bind(session_id)
		.fetch_optional(global.db().as_ref())
		.await
		.map_err(|err| {
			tracing::error!(err = %err, "failed to fetch session");
			AuthError::FetchSession
		})?
		.ok_or(AuthError::SessionExpired)?;

		Self::from_session(global, session).await
	}
}
