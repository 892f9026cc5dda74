use common::config::{DatabaseConfig, LoggingConfig};

use super::Config;

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig<T: ConfigExtention> {
	/// The name of the application
	pub name: String,

	/// The path to the config file
	pub config_file: Option<String>,

	/// The logging configuration
	pub logging: LoggingConfig,

	/// The database configuration
	pub database: DatabaseConfig,

	/// Seconds to wait for in flight work after a shutdown signal
	pub shutdown_grace_secs: u64,

	#[serde(flatten)]
	#[config(flatten)]
	pub extra: T,
}

pub trait ConfigExtention: config::Config + Default {
	const APP_NAME: &'static str;

	fn config_default() -> AppConfig<Self> {
		AppConfig {
			name: Self::APP_NAME.to_owned(),
			config_file: Some("config".to_owned()),
			logging: Default::default(),
			database: Default::default(),
			shutdown_grace_secs: 60,
			extra: Self::default(),
		}
	}

	fn pre_hook(_config: &mut AppConfig<Self>) -> anyhow::Result<()> {
		Ok(())
	}
}

impl<T: ConfigExtention> Default for AppConfig<T> {
	fn default() -> Self {
		T::config_default()
	}
}

impl<'de, T: ConfigExtention + serde::Deserialize<'de>> Config for AppConfig<T> {
	fn logging(&self) -> &LoggingConfig {
		&self.logging
	}

	fn parse() -> anyhow::Result<Self>
	where
		Self: Sized,
	{
		let (mut config, config_file) = common::config::parse::<Self>(!cfg!(test), Self::default().config_file)?;

		config.config_file = config_file;

		Ok(config)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn pre_hook(&mut self) -> anyhow::Result<()> {
		T::pre_hook(self)
	}

	fn shutdown_grace(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.shutdown_grace_secs)
	}
}
