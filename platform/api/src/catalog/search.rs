use sqlx::PgPool;

use crate::database::{Field, Offer, SearchResult, Service};

pub const DEFAULT_LIMIT: u32 = 5;
pub const MAX_LIMIT: u32 = 20;

/// Trigram matches of a query, per category, best match first.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
	pub fields: Vec<SearchResult<Field>>,
	pub services: Vec<SearchResult<Service>>,
	pub offers: Vec<SearchResult<Offer>>,
}

pub async fn search(db: &PgPool, query: &str, limit: Option<u32>) -> sqlx::Result<SearchResults> {
	let query = query.trim();
	if query.is_empty() {
		return Ok(SearchResults::default());
	}

	let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT) as i64;

	let mut tx = db.begin().await?;

	// The default threshold of 0.3 misses most partial words.
	sqlx::query("SET LOCAL pg_trgm.similarity_threshold = 0.1")
		.execute(&mut *tx)
		.await?;

	let fields = sqlx::query_as(
		r#"
		SELECT
			*,
			GREATEST(similarity(name, $1), similarity(city, $1)) AS similarity
		FROM
			fields
		WHERE
			active AND (name % $1 OR city % $1)
		ORDER BY
			similarity DESC,
			name
		LIMIT $2
		"#,
	)
	.bind(query)
	.bind(limit)
	.fetch_all(&mut *tx)
	.await?;

	let services = sqlx::query_as(
		r#"
		SELECT
			*,
			similarity(name, $1) AS similarity
		FROM
			services
		WHERE
			name % $1
		ORDER BY
			similarity DESC,
			name
		LIMIT $2
		"#,
	)
	.bind(query)
	.bind(limit)
	.fetch_all(&mut *tx)
	.await?;

	let offers = sqlx::query_as(
		r#"
		SELECT
			o.*,
			similarity(o.title, $1) AS similarity
		FROM
			offers o
		INNER JOIN
			fields f ON f.id = o.field_id AND f.active
		WHERE
			o.title % $1
		ORDER BY
			similarity DESC,
			o.title
		LIMIT $2
		"#,
	)
	.bind(query)
	.bind(limit)
	.fetch_all(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(SearchResults {
		fields,
		services,
		offers,
	})
}
