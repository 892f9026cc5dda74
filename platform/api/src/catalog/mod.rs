use sqlx::PgPool;

use crate::database::RatedField;

pub mod detail;
pub mod filter;
pub mod search;

pub use filter::{FieldFilter, FieldSort, Page};

/// Every field with its review aggregate, in no particular order.
pub async fn load_rated_fields(db: &PgPool) -> sqlx::Result<Vec<RatedField>> {
	sqlx::query_as(
		r#"
		SELECT
			f.*,
			AVG(r.rating)::FLOAT8 AS rating_average,
			COUNT(r.id) AS review_count
		FROM
			fields f
		LEFT JOIN
			reviews r ON r.field_id = f.id
		GROUP BY
			f.id
		"#,
	)
	.fetch_all(db)
	.await
}
