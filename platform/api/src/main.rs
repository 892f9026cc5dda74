use anyhow::Context as _;
use async_graphql::SDLExportOptions;
use binary_helper::{bootstrap, load_config};
use common::global::GlobalDb;
use fieldbook_api::api::v1::gql::schema;
use fieldbook_api::config::AppConfig;
use fieldbook_api::global::GlobalState;
use fieldbook_api::{api, setup};

#[tokio::main]
pub async fn main() {
	if let Err(err) = run().await {
		eprintln!("{err:#}");
		std::process::exit(1);
	}
}

async fn run() -> anyhow::Result<()> {
	let config = load_config::<AppConfig>()?;

	if config.extra.export_gql {
		let schema = schema::<GlobalState>();

		println!(
			"{}",
			schema.sdl_with_options(
				SDLExportOptions::default()
					.include_specified_by()
					.sorted_arguments()
					.sorted_enum_items()
					.sorted_fields()
			)
		);

		return Ok(());
	}

	bootstrap::<AppConfig, GlobalState, _>(config, |global| async move {
		let config = global.app_config();

		if config.extra.migrate_on_start {
			setup::migrate(global.db()).await.context("failed to run migrations")?;
		}

		if config.extra.seed_on_start {
			setup::seed(global.db()).await.context("failed to seed database")?;
		}

		setup::ensure_admin(global.db(), &config.extra.admin)
			.await
			.context("failed to create admin account")?;

		api::run(global).await
	})
	.await
}
