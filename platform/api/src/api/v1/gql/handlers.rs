use common::http::ext::*;
use common::http::router::ext::RequestExt;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::{header, Request, Response, StatusCode};
use serde_json::json;

use super::ext::RequestExt as _;
use super::MySchema;
use crate::api::error::Result;
use crate::api::request_context::RequestContext;
use crate::api::Body;
use crate::global::ApiGlobal;

pub async fn graphql_handler<G: ApiGlobal>(req: Request<Incoming>) -> Result<Response<Body>> {
	if req.method() == hyper::Method::OPTIONS {
		// The CORS middleware fills in the headers.
		return Ok(Response::builder()
			.status(StatusCode::OK)
			.body(Body::default())
			.expect("failed to build response"));
	}

	let schema = req
		.data::<MySchema<G>>()
		.map_err_route("failed to get schema")?
		.clone();

	let global = req.get_global::<G>()?;

	let context = req
		.data::<RequestContext>()
		.map_err_route("missing request context")?
		.clone();

	let request = match *req.method() {
		hyper::Method::POST => {
			let content_type = req
				.headers()
				.get(header::CONTENT_TYPE)
				.and_then(|val| val.to_str().ok())
				.map(ToOwned::to_owned);

			let body = req
				.into_body()
				.collect()
				.await
				.map_err_route((StatusCode::BAD_REQUEST, "failed to read body"))?
				.to_bytes();

			async_graphql::http::receive_body(content_type, &*body, Default::default())
				.await
				.map_err_route((StatusCode::BAD_REQUEST, "failed to parse body"))?
		}
		hyper::Method::GET => {
			let query = req
				.uri()
				.query()
				.map_err_route((StatusCode::BAD_REQUEST, "missing query string"))?;
			async_graphql::http::parse_query_string(query)
				.map_err_route((StatusCode::BAD_REQUEST, "failed to parse query string"))?
		}
		_ => {
			return Err((StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into());
		}
	}
	.provide_global(global)
	.provide_context(context);

	let response = schema.execute(request).await;

	let mut resp = Response::builder()
		.status(StatusCode::OK)
		.header("Content-Type", "application/json")
		.body(Body::from(
			json!({
				"data": response.data,
				"errors": if response.errors.is_empty() {
					None
				} else {
					Some(response.errors)
				},
				"extensions": response.extensions,
			})
			.to_string(),
		))
		.expect("failed to build response");

	for (key, value) in response.http_headers.iter() {
		resp.headers_mut().insert(key, value.clone());
	}

	Ok(resp)
}
