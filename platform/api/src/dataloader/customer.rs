use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use common::database::Ulid;

use super::LoaderError;
use crate::database::Customer;

pub struct CustomerByIdLoader {
	db: Arc<sqlx::PgPool>,
}

impl CustomerByIdLoader {
	pub fn new(db: Arc<sqlx::PgPool>) -> DataLoader<Self> {
		DataLoader::new(Self { db }, tokio::spawn)
	}
}

impl Loader<Ulid> for CustomerByIdLoader {
	type Error = LoaderError;
	type Value = Customer;

	async fn load(&self, keys: &[Ulid]) -> Result<HashMap<Ulid, Self::Value>, Self::Error> {
		let results: Vec<Self::Value> = sqlx::query_as("SELECT * FROM customers WHERE id = ANY($1)")
			.bind(keys)
			.fetch_all(self.db.as_ref())
			.await
			.map_err(|e| {
				tracing::error!(err = %e, "failed to fetch customers by id");
				Arc::new(e)
			})?;

		Ok(results.into_iter().map(|r| (r.id, r)).collect())
	}
}
