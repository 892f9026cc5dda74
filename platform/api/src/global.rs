use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use binary_helper::global::setup_database;
use binary_helper::impl_global_traits;
use common::context::Context;

use crate::config::{ApiConfig, AppConfig, BookingConfig, JwtConfig};
use crate::dataloader::{CustomerByIdLoader, FieldByIdLoader, OwnerByIdLoader, RatingByFieldLoader, ServicesByFieldLoader};

pub trait ApiState {
	fn field_by_id_loader(&self) -> &DataLoader<FieldByIdLoader>;
	fn owner_by_id_loader(&self) -> &DataLoader<OwnerByIdLoader>;
	fn customer_by_id_loader(&self) -> &DataLoader<CustomerByIdLoader>;
	fn services_by_field_loader(&self) -> &DataLoader<ServicesByFieldLoader>;
	fn rating_by_field_loader(&self) -> &DataLoader<RatingByFieldLoader>;
}

pub trait ApiGlobal:
	common::global::GlobalCtx
	+ common::global::GlobalConfigProvider<ApiConfig>
	+ common::global::GlobalConfigProvider<JwtConfig>
	+ common::global::GlobalConfigProvider<BookingConfig>
	+ common::global::GlobalDb
	+ common::global::GlobalConfig
	+ ApiState
	+ Send
	+ Sync
	+ 'static
{
}

impl<T> ApiGlobal for T where
	T: common::global::GlobalCtx
		+ common::global::GlobalConfigProvider<ApiConfig>
		+ common::global::GlobalConfigProvider<JwtConfig>
		+ common::global::GlobalConfigProvider<BookingConfig>
		+ common::global::GlobalDb
		+ common::global::GlobalConfig
		+ ApiState
		+ Send
		+ Sync
		+ 'static
{
}

pub struct GlobalState {
	ctx: Context,
	config: AppConfig,
	db: Arc<sqlx::PgPool>,

	field_by_id_loader: DataLoader<FieldByIdLoader>,
	owner_by_id_loader: DataLoader<OwnerByIdLoader>,
	customer_by_id_loader: DataLoader<CustomerByIdLoader>,
	services_by_field_loader: DataLoader<ServicesByFieldLoader>,
	rating_by_field_loader: DataLoader<RatingByFieldLoader>,
}

impl GlobalState {
	/// Builds the state around an existing pool.
	pub fn with_pool(ctx: Context, config: AppConfig, db: Arc<sqlx::PgPool>) -> Self {
		Self {
			ctx,
			config,
			field_by_id_loader: FieldByIdLoader::new(db.clone()),
			owner_by_id_loader: OwnerByIdLoader::new(db.clone()),
			customer_by_id_loader: CustomerByIdLoader::new(db.clone()),
			services_by_field_loader: ServicesByFieldLoader::new(db.clone()),
			rating_by_field_loader: RatingByFieldLoader::new(db.clone()),
			db,
		}
	}

	pub fn app_config(&self) -> &AppConfig {
		&self.config
	}
}

impl_global_traits!(GlobalState);

impl common::global::GlobalConfigProvider<ApiConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &ApiConfig {
		&self.config.extra.api
	}
}

impl common::global::GlobalConfigProvider<JwtConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &JwtConfig {
		&self.config.extra.jwt
	}
}

impl common::global::GlobalConfigProvider<BookingConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &BookingConfig {
		&self.config.extra.booking
	}
}

impl ApiState for GlobalState {
	#[inline(always)]
	fn field_by_id_loader(&self) -> &DataLoader<FieldByIdLoader> {
		&self.field_by_id_loader
	}

	#[inline(always)]
	fn owner_by_id_loader(&self) -> &DataLoader<OwnerByIdLoader> {
		&self.owner_by_id_loader
	}

	#[inline(always)]
	fn customer_by_id_loader(&self) -> &DataLoader<CustomerByIdLoader> {
		&self.customer_by_id_loader
	}

	#[inline(always)]
	fn services_by_field_loader(&self) -> &DataLoader<ServicesByFieldLoader> {
		&self.services_by_field_loader
	}

	#[inline(always)]
	fn rating_by_field_loader(&self) -> &DataLoader<RatingByFieldLoader> {
		&self.rating_by_field_loader
	}
}

impl binary_helper::Global<AppConfig> for GlobalState {
	async fn new(ctx: Context, config: AppConfig) -> anyhow::Result<Self> {
		let db = setup_database(&config.database).await?;

		Ok(Self::with_pool(ctx, config, db))
	}
}
