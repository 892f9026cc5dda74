use std::collections::HashSet;

use common::database::Ulid;
use sqlx::migrate::Migrator;
use sqlx::{Executor, PgPool};

use crate::config::AdminConfig;
use crate::database::{hash_password, CustomerRole};

mod seed;

pub use seed::{seed, SeedReport};

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Tables reported by [`status`], in dependency order.
pub const TABLES: [&str; 12] = [
	"owners",
	"fields",
	"services",
	"field_services",
	"offers",
	"customers",
	"sessions",
	"bookers",
	"bookings",
	"payments",
	"reviews",
	"subscriptions",
];

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
	#[error("migration failed: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
	#[error("database error: {0}")]
	Sqlx(#[from] sqlx::Error),
	#[error("failed to hash admin password: {0}")]
	PasswordHash(argon2::password_hash::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
	pub table: &'static str,
	pub rows: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseStatus {
	pub tables: Vec<TableCount>,
	/// `None` when no migration has been applied yet.
	pub latest_migration: Option<i64>,
}

async fn applied_versions(db: &PgPool) -> sqlx::Result<HashSet<i64>> {
	let exists: bool = sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
		.fetch_one(db)
		.await?;

	if !exists {
		return Ok(HashSet::new());
	}

	let versions: Vec<i64> = sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
		.fetch_all(db)
		.await?;

	Ok(versions.into_iter().collect())
}

/// Applies pending migrations and returns the versions applied by this call.
pub async fn migrate(db: &PgPool) -> Result<Vec<i64>, SetupError> {
	let before = applied_versions(db).await?;

	MIGRATOR.run(db).await?;

	let applied = MIGRATOR
		.iter()
		.filter(|migration| !migration.migration_type.is_down_migration())
		.map(|migration| migration.version)
		.filter(|version| !before.contains(version))
		.collect::<Vec<_>>();

	if applied.is_empty() {
		tracing::debug!("database schema is up to date");
	} else {
		tracing::info!(versions = ?applied, "applied migrations");
	}

	Ok(applied)
}

pub async fn status(db: &PgPool) -> Result<DatabaseStatus, SetupError> {
	let mut tables = Vec::with_capacity(TABLES.len());

	for table in TABLES {
		let rows: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
			.fetch_one(db)
			.await?;
		tables.push(TableCount { table, rows });
	}

	let latest_migration = applied_versions(db).await?.into_iter().max();

	Ok(DatabaseStatus {
		tables,
		latest_migration,
	})
}

/// Deletes every catalogue and booking row in one transaction. Customers
/// and their sessions are kept.
pub async fn reset(db: &PgPool) -> Result<u64, SetupError> {
	let mut tx = db.begin().await?;

	let mut deleted = 0;
	for table in [
		"payments",
		"bookings",
		"bookers",
		"reviews",
		"subscriptions",
		"offers",
		"field_services",
		"services",
		"fields",
		"owners",
	] {
		deleted += sqlx::query(&format!("DELETE FROM {table}"))
			.execute(&mut *tx)
			.await?
			.rows_affected();
	}

	tx.commit().await?;

	tracing::warn!(deleted, "database reset");

	Ok(deleted)
}

/// Runs raw SQL over the simple query protocol, so several statements may be
/// sent at once. Returns the total number of rows affected.
pub async fn exec_sql(db: &PgPool, sql: &str, admin_id: Ulid) -> Result<u64, SetupError> {
	tracing::warn!(admin_id = %admin_id, sql, "executing raw sql");

	let result = db.execute(sql).await?;

	Ok(result.rows_affected())
}

/// Creates the configured admin account if it does not exist yet. An existing
/// account with that email is promoted to admin.
pub async fn ensure_admin(db: &PgPool, config: &AdminConfig) -> Result<Option<Ulid>, SetupError> {
	let (Some(email), Some(password)) = (&config.email, &config.password) else {
		return Ok(None);
	};

	let email = email.trim().to_lowercase();
	let password_hash = hash_password(password).map_err(SetupError::PasswordHash)?;

	let id: Ulid = sqlx::query_scalar(
		r#"
		INSERT INTO customers (id, email, password_hash, full_name, phone, role)
		VALUES ($1, $2, $3, 'Administrator', '', $4)
		ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, updated_at = NOW()
		RETURNING id
		"#,
	)
	.bind(Ulid::new())
	.bind(&email)
	.bind(password_hash)
	.bind(CustomerRole::Admin)
	.fetch_one(db)
	.await?;

	tracing::info!(admin_id = %id, email, "admin account ready");

	Ok(Some(id))
}
