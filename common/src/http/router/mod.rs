use std::fmt::{Debug, Formatter};

use self::builder::RouterBuilder;
use self::error::RouterError;
use self::middleware::{PostMiddlewareHandler, PreMiddlewareHandler};
use self::types::{Endpoint, ErrorHandler, RouteHandler, RouteInfo, RouteParams};

pub mod builder;
pub mod error;
pub mod ext;
pub mod middleware;
pub mod types;

/// A path-tree backed request router.
///
/// Routes are grouped per path; each method of a path carries its own chain
/// of pre middleware, post middleware and error handler inherited from the
/// scopes it was declared in.
pub struct Router<I, O, E> {
	routes: Vec<RouteHandler<I, O, E>>,
	pre_middlewares: Vec<PreMiddlewareHandler<E>>,
	post_middlewares: Vec<PostMiddlewareHandler<O, E>>,
	error_handlers: Vec<ErrorHandler<O, E>>,
	endpoints: Vec<Endpoint>,
	not_found: Option<RouteInfo>,
	tree: path_tree::PathTree<usize>,
}

impl<I: 'static, O: 'static, E: 'static> Router<I, O, E> {
	pub fn builder() -> RouterBuilder<I, O, E> {
		RouterBuilder::new()
	}

	fn lookup(&self, method: &hyper::Method, path: &str) -> Result<(&RouteInfo, RouteParams), RouterError<E>> {
		let matched = self.tree.find(path).map(|(idx, path)| {
			let params = RouteParams(
				path.params_iter()
					.map(|(k, v)| (k.to_owned(), v.to_owned()))
					.collect(),
			);
			(&self.endpoints[*idx], params)
		});

		match matched {
			Some((endpoint, params)) => match endpoint.resolve(method) {
				Some(info) => Ok((info, params)),
				None => self
					.not_found
					.as_ref()
					.map(|info| (info, RouteParams::default()))
					.ok_or(RouterError::MethodNotAllowed),
			},
			None => self
				.not_found
				.as_ref()
				.map(|info| (info, RouteParams::default()))
				.ok_or(RouterError::NotFound),
		}
	}

	pub async fn handle(&self, req: hyper::Request<I>) -> Result<hyper::Response<O>, RouterError<E>> {
		let (info, params) = self.lookup(req.method(), req.uri().path())?;

		let error_handler = info.error_handler.map(|idx| self.error_handlers[idx].0.as_ref());

		let (mut parts, body) = req.into_parts();
		parts.extensions.insert(params);

		for idx in info.pre_middleware.iter().copied() {
			let head = hyper::Request::from_parts(parts.clone(), ());
			match (self.pre_middlewares[idx].0)(head).await {
				Ok(head) => parts = head.into_parts().0,
				Err(err) => {
					let head = hyper::Request::from_parts(parts, ());
					return match error_handler {
						Some(error_handler) => Ok(error_handler((head, err)).await),
						None => Err(RouterError::Unhandled(err)),
					};
				}
			}
		}

		let head = hyper::Request::from_parts(parts.clone(), ());

		let mut res = match (self.routes[info.route].0)(hyper::Request::from_parts(parts, body)).await {
			Ok(res) => res,
			Err(err) => match error_handler {
				Some(error_handler) => error_handler((head.clone(), err)).await,
				None => return Err(RouterError::Unhandled(err)),
			},
		};

		for idx in info.post_middleware.iter().copied() {
			res = match (self.post_middlewares[idx].0)((res, head.clone())).await {
				Ok(res) => res,
				Err(err) => {
					return match error_handler {
						Some(error_handler) => Ok(error_handler((head, err)).await),
						None => Err(RouterError::Unhandled(err)),
					};
				}
			};
		}

		Ok(res)
	}
}

impl<I, O, E> Debug for Router<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes)
			.field("pre_middlewares", &self.pre_middlewares)
			.field("post_middlewares", &self.post_middlewares)
			.field("error_handlers", &self.error_handlers)
			.field("endpoints", &self.endpoints)
			.finish()
	}
}
