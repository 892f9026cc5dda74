use std::sync::Arc;

use crate::logging;

/// Environment variables with this prefix override config keys,
/// `FIELDBOOK_DATABASE_URI` sets `database.uri`.
pub const ENV_PREFIX: &str = "FIELDBOOK";

#[derive(Debug, Clone, Default, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct TlsConfig {
	/// The path to the TLS certificate
	pub cert: String,

	/// The path to the TLS private key
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl ::config::Config for logging::Mode {
	fn graph() -> Arc<::config::KeyGraph> {
		Arc::new(::config::KeyGraph::String)
	}
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,

	/// Upper bound of pooled connections
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://postgres@localhost:5432/fieldbook".to_string(),
			max_connections: 10,
		}
	}
}

/// Builds `C` from, in order of precedence, the command line, the
/// environment and a config file.
///
/// A config file named on the command line or in the environment must exist.
/// The default file is optional.
pub fn parse<'de, C: config::Config + serde::Deserialize<'de> + 'static>(
	enable_cli: bool,
	config_file: Option<String>,
) -> config::Result<(C, Option<String>)> {
	let mut builder = config::ConfigBuilder::new();

	if enable_cli {
		builder.add_source_with_priority(config::sources::CliSource::new()?, 3);
	}

	builder.add_source_with_priority(config::sources::EnvSource::with_prefix(ENV_PREFIX)?, 2);

	let key = builder.parse_key::<Option<String>>("config_file")?;

	let key_provided = key.is_some();

	let mut config_path = None;

	if let Some(path) = key.or(config_file) {
		match config::sources::FileSource::with_path(path) {
			Ok(source) => {
				config_path = Some(source.location().to_string());
				builder.add_source_with_priority(source, 1);
			}
			Err(err) => {
				if key_provided || !err.is_io() {
					return Err(err);
				}

				tracing::debug!("failed to load config file: {}", err);
			}
		}
	}

	let config_path = config_path.map(|p| {
		std::fs::canonicalize(&p)
			.map(|p| p.display().to_string())
			.unwrap_or(p)
	});

	Ok((builder.build()?, config_path))
}
