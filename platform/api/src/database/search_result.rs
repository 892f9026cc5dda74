use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

#[derive(Debug, Clone)]
pub struct SearchResult<T> {
	/// The matched row.
	pub object: T,
	/// The trigram similarity of the search query to the row.
	pub similarity: f32,
}

impl<'r, T: FromRow<'r, PgRow>> FromRow<'r, PgRow> for SearchResult<T> {
	fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
		Ok(Self {
			object: T::from_row(row)?,
			similarity: row.try_get("similarity")?,
		})
	}
}
