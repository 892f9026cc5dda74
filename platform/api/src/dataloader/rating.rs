use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use common::database::Ulid;

use super::LoaderError;
use crate::database::RatingSummary;

#[derive(sqlx::FromRow)]
struct RatingRow {
	field_id: Ulid,
	average: Option<f64>,
	count: i64,
}

/// Review aggregate per field. Fields without reviews get an empty summary.
pub struct RatingByFieldLoader {
	db: Arc<sqlx::PgPool>,
}

impl RatingByFieldLoader {
	pub fn new(db: Arc<sqlx::PgPool>) -> DataLoader<Self> {
		DataLoader::new(Self { db }, tokio::spawn)
	}
}

impl Loader<Ulid> for RatingByFieldLoader {
	type Error = LoaderError;
	type Value = RatingSummary;

	async fn load(&self, keys: &[Ulid]) -> Result<HashMap<Ulid, Self::Value>, Self::Error> {
		let results: Vec<RatingRow> = sqlx::query_as(
			r#"
			SELECT
				field_id,
				AVG(rating)::FLOAT8 AS average,
				COUNT(*) AS count
			FROM
				reviews
			WHERE
				field_id = ANY($1)
			GROUP BY
				field_id
			"#,
		)
		.bind(keys)
		.fetch_all(self.db.as_ref())
		.await
		.map_err(|e| {
			tracing::error!(err = %e, "failed to fetch field ratings");
			Arc::new(e)
		})?;

		let mut map: HashMap<Ulid, RatingSummary> = keys.iter().map(|key| (*key, RatingSummary::default())).collect();
		for row in results {
			map.insert(
				row.field_id,
				RatingSummary {
					average: row.average,
					count: row.count,
				},
			);
		}

		Ok(map)
	}
}
