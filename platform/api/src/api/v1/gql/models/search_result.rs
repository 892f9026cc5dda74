use async_graphql::{OutputType, SimpleObject};

use super::field::Field;
use super::offer::Offer;
use super::service::Service;
use crate::database;
use crate::global::ApiGlobal;

#[derive(SimpleObject)]
#[graphql(concrete(name = "FieldSearchResult", params("Field<G>"), bounds("G: ApiGlobal")))]
#[graphql(concrete(name = "OfferSearchResult", params("Offer<G>"), bounds("G: ApiGlobal")))]
#[graphql(concrete(name = "ServiceSearchResult", params(Service)))]
pub struct SearchResult<T: OutputType> {
	pub object: T,
	pub similarity: f32,
}

impl<T: Into<O>, O: OutputType> From<database::SearchResult<T>> for SearchResult<O> {
	fn from(value: database::SearchResult<T>) -> Self {
		Self {
			object: value.object.into(),
			similarity: value.similarity,
		}
	}
}

#[derive(SimpleObject)]
pub struct SearchResults<G: ApiGlobal> {
	pub fields: Vec<SearchResult<Field<G>>>,
	pub services: Vec<SearchResult<Service>>,
	pub offers: Vec<SearchResult<Offer<G>>>,
}
