use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::future::Future;

use super::middleware::{Middleware, PostMiddlewareHandler, PreMiddlewareHandler};
use super::types::{Endpoint, ErrorHandler, RouteHandler, RouteInfo};
use super::Router;

enum Item<I, O, E> {
	Route(Option<hyper::Method>, RouteHandler<I, O, E>),
	Scope(RouterBuilder<I, O, E>),
}

impl<I, O, E> Debug for Item<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Item::Route(method, _) => write!(f, "Route({method:?})"),
			Item::Scope(builder) => write!(f, "Scope({builder:?})"),
		}
	}
}

pub struct RouterBuilder<I, O, E> {
	items: Vec<(&'static str, Item<I, O, E>)>,
	pre_middleware: Vec<PreMiddlewareHandler<E>>,
	post_middleware: Vec<PostMiddlewareHandler<O, E>>,
	error_handler: Option<ErrorHandler<O, E>>,
	not_found: Option<RouteHandler<I, O, E>>,
}

impl<I, O, E> Debug for RouterBuilder<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("items", &self.items)
			.field("pre_middleware", &self.pre_middleware)
			.field("post_middleware", &self.post_middleware)
			.field("error_handler", &self.error_handler)
			.finish()
	}
}

impl<I: 'static, O: 'static, E: 'static> Default for RouterBuilder<I, O, E> {
	fn default() -> Self {
		Self::new()
	}
}

macro_rules! method_fn {
	($name:ident, $method:ident) => {
		pub fn $name<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
			self,
			path: &'static str,
			handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
		) -> Self {
			self.add_route(Some(hyper::Method::$method), path, handler)
		}
	};
}

fn join_path(parent: &str, path: &str) -> String {
	let parent = parent.trim_matches('/');
	let path = path.trim_matches('/');

	match (parent.is_empty(), path.is_empty()) {
		(true, true) => "/".to_string(),
		(true, false) => format!("/{path}"),
		(false, true) => format!("/{parent}"),
		(false, false) => format!("/{parent}/{path}"),
	}
}

impl<I: 'static, O: 'static, E: 'static> RouterBuilder<I, O, E> {
	pub fn new() -> Self {
		Self {
			items: Vec::new(),
			pre_middleware: Vec::new(),
			post_middleware: Vec::new(),
			error_handler: None,
			not_found: None,
		}
	}

	method_fn!(get, GET);

	method_fn!(post, POST);

	method_fn!(put, PUT);

	method_fn!(patch, PATCH);

	method_fn!(delete, DELETE);

	method_fn!(options, OPTIONS);

	pub fn any<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		self,
		path: &'static str,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		self.add_route(None, path, handler)
	}

	pub fn add_route<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		mut self,
		method: Option<hyper::Method>,
		path: &'static str,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		let handler = RouteHandler(Box::new(move |req| Box::pin(handler(req))));
		self.items.push((path, Item::Route(method, handler)));
		self
	}

	pub fn middleware(mut self, middleware: Middleware<O, E>) -> Self {
		match middleware {
			Middleware::Pre(handler) => self.pre_middleware.push(handler),
			Middleware::Post(handler) => self.post_middleware.push(handler),
		}

		self
	}

	/// Makes `data` available to every route of this builder through
	/// [`RequestExt::data`](super::ext::RequestExt::data).
	pub fn data<T: Clone + Send + Sync + 'static>(self, data: T) -> Self {
		self.middleware(Middleware::pre(move |mut req| {
			req.extensions_mut().insert(data.clone());
			async move { Ok(req) }
		}))
	}

	pub fn error_handler<F: Future<Output = hyper::Response<O>> + Send + 'static>(
		mut self,
		handler: impl Fn(hyper::Request<()>, E) -> F + Send + Sync + 'static,
	) -> Self {
		self.error_handler = Some(ErrorHandler(Box::new(move |(req, err)| Box::pin(handler(req, err)))));
		self
	}

	pub fn scope(mut self, path: &'static str, router: RouterBuilder<I, O, E>) -> Self {
		self.items.push((path, Item::Scope(router)));
		self
	}

	/// Fallback for requests no route matches. Only honoured on the root
	/// builder, where it runs behind the root middleware.
	pub fn not_found<F: Future<Output = Result<hyper::Response<O>, E>> + Send + 'static>(
		mut self,
		handler: impl Fn(hyper::Request<I>) -> F + Send + Sync + 'static,
	) -> Self {
		self.not_found = Some(RouteHandler(Box::new(move |req| Box::pin(handler(req)))));
		self
	}

	#[allow(clippy::too_many_arguments)]
	fn build_scoped(
		self,
		root: bool,
		parent_path: &str,
		target: &mut Router<I, O, E>,
		paths: &mut HashMap<String, usize>,
		pre_middleware: &[usize],
		post_middleware: &[usize],
		error_handler: Option<usize>,
	) {
		let error_handler = match self.error_handler {
			Some(handler) => {
				target.error_handlers.push(handler);
				Some(target.error_handlers.len() - 1)
			}
			None => error_handler,
		};

		let pre_middleware = pre_middleware
			.iter()
			.copied()
			.chain(self.pre_middleware.into_iter().map(|handler| {
				target.pre_middlewares.push(handler);
				target.pre_middlewares.len() - 1
			}))
			.collect::<Vec<_>>();

		let post_middleware = post_middleware
			.iter()
			.copied()
			.chain(self.post_middleware.into_iter().map(|handler| {
				target.post_middlewares.push(handler);
				target.post_middlewares.len() - 1
			}))
			.collect::<Vec<_>>();

		if let Some(handler) = self.not_found {
			if root {
				target.routes.push(handler);
				target.not_found = Some(RouteInfo {
					route: target.routes.len() - 1,
					pre_middleware: pre_middleware.clone(),
					post_middleware: post_middleware.clone(),
					error_handler,
				});
			} else {
				tracing::warn!(parent_path, "not_found handler on a scoped router is ignored");
			}
		}

		for (path, item) in self.items {
			match item {
				Item::Route(method, handler) => {
					target.routes.push(handler);

					let info = RouteInfo {
						route: target.routes.len() - 1,
						pre_middleware: pre_middleware.clone(),
						post_middleware: post_middleware.clone(),
						error_handler,
					};

					let full_path = join_path(parent_path, path);

					tracing::debug!(method = ?method, path = full_path, "adding route");

					let idx = *paths.entry(full_path).or_insert_with(|| {
						target.endpoints.push(Endpoint::default());
						target.endpoints.len() - 1
					});

					let endpoint = &mut target.endpoints[idx];
					match method {
						Some(method) => {
							endpoint.methods.retain(|(m, _)| *m != method);
							endpoint.methods.push((method, info));
						}
						None => endpoint.any = Some(info),
					}
				}
				Item::Scope(router) => {
					let path = join_path(parent_path, path);
					router.build_scoped(
						false,
						path.trim_end_matches('/'),
						target,
						paths,
						&pre_middleware,
						&post_middleware,
						error_handler,
					);
				}
			}
		}
	}

	pub fn build(self) -> Router<I, O, E> {
		let mut router = Router {
			routes: Vec::new(),
			pre_middlewares: Vec::new(),
			post_middlewares: Vec::new(),
			error_handlers: Vec::new(),
			endpoints: Vec::new(),
			not_found: None,
			tree: path_tree::PathTree::new(),
		};

		let mut paths = HashMap::new();
		self.build_scoped(true, "", &mut router, &mut paths, &[], &[], None);

		for (path, idx) in paths {
			let _ = router.tree.insert(&path, idx);
		}

		router
	}
}
