use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use common::config::DatabaseConfig;
pub use common::global::{GlobalConfig, GlobalConfigProvider, GlobalCtx, GlobalDb};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;

#[macro_export]
macro_rules! impl_global_traits {
	($struct:ty) => {
		impl binary_helper::global::GlobalCtx for $struct {
			#[inline(always)]
			fn ctx(&self) -> &common::context::Context {
				&self.ctx
			}
		}

		impl binary_helper::global::GlobalDb for $struct {
			#[inline(always)]
			fn db(&self) -> &std::sync::Arc<sqlx::PgPool> {
				&self.db
			}
		}

		impl binary_helper::global::GlobalConfig for $struct {}
	};
}

pub async fn setup_database(config: &DatabaseConfig) -> anyhow::Result<Arc<sqlx::PgPool>> {
	let options = PgConnectOptions::from_str(&config.uri)
		.context("invalid database uri")?
		.disable_statement_logging();

	let pool = PgPoolOptions::new()
		.max_connections(config.max_connections.max(1))
		.acquire_timeout(Duration::from_secs(10))
		.connect_with(options)
		.await
		.context("failed to connect to database")?;

	tracing::info!(max_connections = config.max_connections, "connected to database");

	Ok(Arc::new(pool))
}
