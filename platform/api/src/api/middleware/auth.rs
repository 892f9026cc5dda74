use std::sync::Arc;

use common::http::ext::RequestGlobalExt as _;
use common::http::router::ext::RequestExt as _;
use common::http::router::middleware::Middleware;
use common::http::RouteError;
use hyper::http::header;

use crate::api::auth::{AuthData, AuthError};
use crate::api::error::ApiError;
use crate::api::jwt::{AuthJwtPayload, JwtState};
use crate::api::request_context::RequestContext;
use crate::api::Body;
use crate::config::JwtConfig;
use crate::global::ApiGlobal;

/// Attaches a [`RequestContext`] to every request and fills it from the
/// bearer token, if one is sent. A request without a token passes through;
/// a request with a bad token fails with 401.
pub fn auth_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::pre(|mut req| async move {
		let context = RequestContext::default();
		req.provide(context.clone());

		let Some(token) = req.headers().get(header::AUTHORIZATION) else {
			return Ok(req);
		};

		let global = req.get_global::<G>()?;

		let token = token
			.to_str()
			.map_err(|_| AuthError::HeaderToStr)?
			.strip_prefix("Bearer ")
			.ok_or(AuthError::NotBearerToken)?;

		let jwt = AuthJwtPayload::verify(global.config::<JwtConfig>(), token).ok_or(AuthError::InvalidToken)?;

		let data = AuthData::from_session_id(&global, jwt.session_id).await?;

		if data.customer.id != jwt.customer_id {
			return Err(AuthError::InvalidToken.into());
		}

		context.set_auth(data).await;

		Ok(req)
	})
}
