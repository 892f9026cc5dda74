use std::net::SocketAddr;

use binary_helper::config::{AppConfig as BaseConfig, ConfigExtention};
use common::config::TlsConfig;

pub type AppConfig = BaseConfig<ApiExtConfig>;

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
/// The API is the backend for the Fieldbook booking service
pub struct ApiExtConfig {
	/// If we should export the GraphQL schema, if set to true, the schema will
	/// be exported to the stdout, and the program will exit.
	pub export_gql: bool,

	/// API Config
	pub api: ApiConfig,

	/// JWT Config
	pub jwt: JwtConfig,

	/// Booking rules
	pub booking: BookingConfig,

	/// Bootstrap admin account
	pub admin: AdminConfig,

	/// Run pending migrations when the server starts
	pub migrate_on_start: bool,

	/// Insert the sample catalogue when the server starts
	pub seed_on_start: bool,
}

impl Default for ApiExtConfig {
	fn default() -> Self {
		Self {
			export_gql: false,
			api: ApiConfig::default(),
			jwt: JwtConfig::default(),
			booking: BookingConfig::default(),
			admin: AdminConfig::default(),
			migrate_on_start: true,
			seed_on_start: false,
		}
	}
}

impl ConfigExtention for ApiExtConfig {
	const APP_NAME: &'static str = "fieldbook-api";

	fn pre_hook(config: &mut AppConfig) -> anyhow::Result<()> {
		config.extra.booking.validate()?;

		if config.extra.jwt.session_ttl_secs == 0 {
			anyhow::bail!("jwt.session_ttl_secs must be greater than zero");
		}

		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,

	/// If we should use TLS for the API server
	pub tls: Option<TlsConfig>,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], 4000)),
			tls: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct JwtConfig {
	/// JWT secret
	pub secret: String,

	/// JWT issuer
	pub issuer: String,

	/// How long a session lives unless the client asks for less
	pub session_ttl_secs: u32,
}

impl Default for JwtConfig {
	fn default() -> Self {
		Self {
			issuer: "fieldbook".to_string(),
			secret: "fieldbook".to_string(),
			session_ttl_secs: 60 * 60 * 24 * 7,
		}
	}
}

#[derive(Debug, Clone, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct BookingConfig {
	/// First bookable hour of the day (UTC)
	pub open_hour: u32,

	/// Hour at which the last booking must have ended (UTC), 24 is midnight
	pub close_hour: u32,

	pub min_duration_minutes: u32,

	pub max_duration_minutes: u32,

	/// Granularity of booking start and end times
	pub slot_minutes: u32,

	/// How far into the future a booking may start
	pub max_advance_days: u32,
}

impl Default for BookingConfig {
	fn default() -> Self {
		Self {
			open_hour: 8,
			close_hour: 23,
			min_duration_minutes: 60,
			max_duration_minutes: 240,
			slot_minutes: 30,
			max_advance_days: 60,
		}
	}
}

impl BookingConfig {
	pub fn validate(&self) -> anyhow::Result<()> {
		if self.close_hour > 24 {
			anyhow::bail!("booking.close_hour must be at most 24");
		}

		if self.open_hour >= self.close_hour {
			anyhow::bail!("booking.open_hour must be before booking.close_hour");
		}

		if self.slot_minutes == 0 {
			anyhow::bail!("booking.slot_minutes must be greater than zero");
		}

		if self.min_duration_minutes > self.max_duration_minutes {
			anyhow::bail!("booking.min_duration_minutes must not exceed booking.max_duration_minutes");
		}

		Ok(())
	}
}

#[derive(Debug, Clone, Default, PartialEq, config::Config, serde::Deserialize)]
#[serde(default)]
pub struct AdminConfig {
	/// Email of the admin account created on start when missing
	pub email: Option<String>,

	/// Password of that account
	pub password: Option<String>,
}
