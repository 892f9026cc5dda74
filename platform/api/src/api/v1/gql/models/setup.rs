use async_graphql::SimpleObject;

use crate::setup;

#[derive(SimpleObject, Clone)]
pub struct TableCount {
	pub table: String,
	pub rows: i64,
}

#[derive(SimpleObject, Clone)]
pub struct DatabaseStatus {
	pub tables: Vec<TableCount>,
	pub latest_migration: Option<i64>,
}

impl From<setup::DatabaseStatus> for DatabaseStatus {
	fn from(value: setup::DatabaseStatus) -> Self {
		Self {
			tables: value
				.tables
				.into_iter()
				.map(|t| TableCount {
					table: t.table.to_string(),
					rows: t.rows,
				})
				.collect(),
			latest_migration: value.latest_migration,
		}
	}
}

#[derive(SimpleObject, Clone, Copy)]
pub struct SeedReport {
	pub owners: u64,
	pub fields: u64,
	pub services: u64,
	pub field_services: u64,
	pub offers: u64,
}

impl From<setup::SeedReport> for SeedReport {
	fn from(value: setup::SeedReport) -> Self {
		Self {
			owners: value.owners,
			fields: value.fields,
			services: value.services,
			field_services: value.field_services,
			offers: value.offers,
		}
	}
}

#[derive(SimpleObject, Clone, Copy, sqlx::FromRow)]
pub struct Dashboard {
	pub fields: i64,
	pub active_fields: i64,
	pub customers: i64,
	pub pending_bookings: i64,
	pub confirmed_bookings: i64,
	pub cancelled_bookings: i64,
	pub completed_bookings: i64,
	pub reviews: i64,
	pub active_offers: i64,
	/// Sum of paid payments.
	pub revenue_cents: i64,
	pub average_rating: Option<f64>,
}
