use std::sync::{Arc, Mutex};

use common::http::router::ext::RequestExt as _;
use common::http::router::middleware::Middleware;
use common::http::RouteError;
use hyper::header::IntoHeaderName;
use hyper::Request;

use crate::api::error::ApiError;
use crate::api::Body;
use crate::global::ApiGlobal;

/// Headers collected while handling a request and copied onto the response.
#[derive(Clone)]
pub struct ResponseHeadersMiddleware(pub Arc<Mutex<hyper::HeaderMap>>);

impl Default for ResponseHeadersMiddleware {
	fn default() -> Self {
		Self(Arc::new(Mutex::new(hyper::HeaderMap::new())))
	}
}

pub fn pre_flight_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::pre(|mut req| async move {
		req.provide(ResponseHeadersMiddleware::default());

		Ok(req)
	})
}

pub fn post_flight_middleware<G: ApiGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::post_with_req(|mut resp, req| async move {
		if let Some(headers) = req.data::<ResponseHeadersMiddleware>() {
			let headers = headers.0.lock().map_err(|_| RouteError::from("failed to lock response headers"))?;
			headers.iter().for_each(|(k, v)| {
				resp.headers_mut().insert(k, v.clone());
			});
		}

		Ok(resp)
	})
}

pub trait RequestExt {
	fn set_response_header<K, V>(&self, key: K, value: V)
	where
		K: IntoHeaderName,
		V: Into<hyper::header::HeaderValue>;
}

impl<B> RequestExt for Request<B> {
	fn set_response_header<K, V>(&self, key: K, value: V)
	where
		K: IntoHeaderName,
		V: Into<hyper::header::HeaderValue>,
	{
		let Some(headers) = self.data::<ResponseHeadersMiddleware>() else {
			return;
		};

		if let Ok(mut headers) = headers.0.lock() {
			headers.insert(key, value.into());
		}
	}
}
