use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{name} must be a valid {expected}, got {value:?}")]
	Invalid {
		name: &'static str,
		expected: &'static str,
		value: String,
	},
}

/// Runtime configuration, read from the environment.
///
/// Call [`dotenvy::dotenv`] first to pick up a `.env` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
	/// Postgres connection string. Without one, jokes are kept in memory.
	pub database_url: Option<String>,
	pub host: IpAddr,
	pub port: u16,
	/// OTLP collector endpoint. Traces and metrics are only exported when set.
	pub otlp_endpoint: Option<String>,
}

impl Config {
	pub fn from_env() -> Result<Self, Error> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the configuration from `lookup`, treating empty values as unset.
	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
		let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

		let host: IpAddr = match get("HOST") {
			Some(value) => value.parse().map_err(|_| Error::Invalid {
				name: "HOST",
				expected: "IP address",
				value,
			})?,
			None => IpAddr::V4(Ipv4Addr::LOCALHOST),
		};

		let port: u16 = match get("PORT") {
			Some(value) => value.parse().map_err(|_| Error::Invalid {
				name: "PORT",
				expected: "port number",
				value,
			})?,
			None => 3000,
		};

		Ok(Self {
			database_url: get("DATABASE_URL"),
			host,
			port,
			otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
		})
	}
}
