use std::sync::Arc;

use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use common::make_response;
use hyper::body::Incoming;
use hyper::header::{HeaderValue, CACHE_CONTROL};
use hyper::{Request, Response, StatusCode};
use serde_json::json;

use crate::api::error::{ApiError, Result};
use crate::api::middleware::response_headers::RequestExt as _;
use crate::api::Body;
use crate::global::ApiGlobal;

async fn health(req: Request<Incoming>) -> Result<Response<Body>> {
	req.set_response_header(CACHE_CONTROL, HeaderValue::from_static("no-store"));

	Ok(make_response!(
		StatusCode::OK,
		json!({
			"status": "ok"
		})
	))
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder().get("/", health)
}
