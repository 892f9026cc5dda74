use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use common::database::Ulid;

use super::LoaderError;
use crate::database::{FieldService, Service};

/// Services attached to each field, ordered by name. Fields without services
/// map to an empty list.
pub struct ServicesByFieldLoader {
	db: Arc<sqlx::PgPool>,
}

impl ServicesByFieldLoader {
	pub fn new(db: Arc<sqlx::PgPool>) -> DataLoader<Self> {
		DataLoader::new(Self { db }, tokio::spawn)
	}
}

impl Loader<Ulid> for ServicesByFieldLoader {
	type Error = LoaderError;
	type Value = Vec<Service>;

	async fn load(&self, keys: &[Ulid]) -> Result<HashMap<Ulid, Self::Value>, Self::Error> {
		let results: Vec<FieldService> = sqlx::query_as(
			r#"
			SELECT
				fs.field_id,
				s.*
			FROM
				field_services fs
				INNER JOIN services s ON s.id = fs.service_id
			WHERE
				fs.field_id = ANY($1)
			ORDER BY
				s.name
			"#,
		)
		.bind(keys)
		.fetch_all(self.db.as_ref())
		.await
		.map_err(|e| {
			tracing::error!(err = %e, "failed to fetch field services");
			Arc::new(e)
		})?;

		let mut map: HashMap<Ulid, Vec<Service>> = keys.iter().map(|key| (*key, Vec::new())).collect();
		for row in results {
			map.entry(row.field_id).or_default().push(row.service);
		}

		Ok(map)
	}
}
