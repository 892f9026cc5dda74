use async_graphql::Context;
use common::database::Ulid;

use super::error::{GqlError, Result};
use super::ext::ContextExt;
use crate::api::auth::{AuthData, AuthError};

/// The logged in caller, or `Auth(NotLoggedIn)`.
pub async fn require_auth(ctx: &Context<'_>) -> Result<AuthData> {
	ctx.get_req_context()
		.auth()
		.await?
		.ok_or_else(|| GqlError::Auth(AuthError::NotLoggedIn).into())
}

/// The logged in caller if it is an admin.
pub async fn admin_guard(ctx: &Context<'_>) -> Result<AuthData> {
	let auth = require_auth(ctx).await?;

	if !auth.is_admin() {
		return Err(GqlError::Unauthorized { field: "admin" }.into());
	}

	Ok(auth)
}

// Field level guards cannot see the parent object, so the owner check lives here.
pub async fn auth_guard<T>(ctx: &Context<'_>, field_name: &'static str, field_value: T, customer_id: Ulid) -> Result<T> {
	let auth = ctx.get_req_context().auth().await?;

	if let Some(auth) = auth {
		if auth.customer_id() == customer_id || auth.is_admin() {
			return Ok(field_value);
		}
	}

	Err(GqlError::Unauthorized { field: field_name }.into())
}
