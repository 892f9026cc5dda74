use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
pub type BoxFunction<I, O> = Box<dyn Fn(I) -> O + Send + Sync>;

/// Path parameters captured while matching a request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(pub Vec<(String, String)>);

pub(crate) struct RouteHandler<I, O, E>(pub BoxFunction<hyper::Request<I>, BoxFuture<Result<hyper::Response<O>, E>>>);

impl<I, O, E> Debug for RouteHandler<I, O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "RouteHandler(..)")
	}
}

pub(crate) struct ErrorHandler<O, E>(pub BoxFunction<(hyper::Request<()>, E), BoxFuture<hyper::Response<O>>>);

impl<O, E> Debug for ErrorHandler<O, E> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ErrorHandler(..)")
	}
}

/// Indexes into the router's handler tables for one method of one path.
#[derive(Debug, Clone)]
pub(crate) struct RouteInfo {
	pub route: usize,
	pub pre_middleware: Vec<usize>,
	pub post_middleware: Vec<usize>,
	pub error_handler: Option<usize>,
}

/// Every route registered under the same path.
#[derive(Debug, Clone, Default)]
pub(crate) struct Endpoint {
	pub methods: Vec<(hyper::Method, RouteInfo)>,
	pub any: Option<RouteInfo>,
}

impl Endpoint {
	pub fn resolve(&self, method: &hyper::Method) -> Option<&RouteInfo> {
		self.methods
			.iter()
			.find(|(m, _)| m == method)
			.map(|(_, info)| info)
			.or(self.any.as_ref())
	}
}
