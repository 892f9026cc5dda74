use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql::{extensions, EmptySubscription, Schema};
use common::http::router::builder::RouterBuilder;
use common::http::router::Router;
use common::http::RouteError;
use hyper::body::Incoming;
use hyper::Response;

use crate::api::error::ApiError;
use crate::api::Body;
use crate::global::ApiGlobal;

pub mod error;
pub mod ext;
pub mod guards;
mod handlers;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod validators;

pub type MySchema<G> = Schema<queries::Query<G>, mutations::Mutation<G>, EmptySubscription>;

pub fn schema<G: ApiGlobal>() -> MySchema<G> {
	Schema::build(
		queries::Query::<G>::default(),
		mutations::Mutation::<G>::default(),
		EmptySubscription,
	)
	.extension(extensions::Tracing)
	.limit_complexity(200) // We don't want to allow too complex queries to be executed
	.finish()
}

pub fn playground_html() -> String {
	GraphiQLSource::build().endpoint("/v1/gql").title("Fieldbook").finish()
}

pub fn routes<G: ApiGlobal>(_: &Arc<G>) -> RouterBuilder<Incoming, Body, RouteError<ApiError>> {
	Router::builder()
		.data(schema::<G>())
		.any("/", handlers::graphql_handler::<G>)
		.get("/playground", move |_| async move {
			Ok(Response::builder()
				.status(200)
				.header("content-type", "text/html")
				.body(Body::from(playground_html()))
				.expect("failed to build response"))
		})
}
