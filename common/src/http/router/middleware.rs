use std::fmt::{Debug, Formatter};
use std::future::Future;

use super::types::{BoxFunction, BoxFuture};

pub struct PreMiddlewareHandler<E>(pub(crate) BoxFunction<hyper::Request<()>, BoxFuture<Result<hyper::Request<()>, E>>>);

#[allow(clippy::type_complexity)]
pub struct PostMiddlewareHandler<O, E>(
	pub(crate) BoxFunction<(hyper::Response<O>, hyper::Request<()>), BoxFuture<Result<hyper::Response<O>, E>>>,
);

impl<E> Debug for PreMiddlewareHandler<E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "PreMiddlewareHandler(..)")
	}
}

impl<O, E> Debug for PostMiddlewareHandler<O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "PostMiddlewareHandler(..)")
	}
}

/// Pre middleware sees the request head before the route handler runs and
/// may rewrite it (the body is not available). Post middleware sees the
/// response together with the request head.
pub enum Middleware<O, E> {
	Pre(PreMiddlewareHandler<E>),
	Post(PostMiddlewareHandler<O, E>),
}

impl<O, E> Debug for Middleware<O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Middleware::Pre(_) => write!(f, "Pre(..)"),
			Middleware::Post(_) => write!(f, "Post(..)"),
		}
	}
}

impl<O: 'static, E: 'static> Middleware<O, E> {
	pub fn pre<F: Future<Output = Result<hyper::Request<()>, E>> + Send + 'static>(
		handler: impl Fn(hyper::Request<()>) -> F + Send + Sync + 'static,
	) -> Self {
		Self::Pre(PreMiddlewareHandler(Box::new(move |req| Box::pin(handler(req)))))
	}

	pub fn post<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		handler: impl Fn(hyper::Response<O>) -> F + Send + Sync + 'static,
	) -> Self {
		Self::Post(PostMiddlewareHandler(Box::new(move |(res, _)| Box::pin(handler(res)))))
	}

	pub fn post_with_req<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		handler: impl Fn(hyper::Response<O>, hyper::Request<()>) -> F + Send + Sync + 'static,
	) -> Self {
		Self::Post(PostMiddlewareHandler(Box::new(move |(res, req)| Box::pin(handler(res, req)))))
	}
}
