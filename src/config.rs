//! Runtime configuration sourced from the process environment.
//!
//! Only the remote API location and the request timeout are runtime settings. The protected
//! prefix, excluded paths, login path, and cache TTL are fixed in
//! [`GatePolicy`](crate::gate::GatePolicy).

// self
use crate::{_prelude::*, error::ConfigError, http};

/// Environment variable holding the remote API base URL.
pub const API_URL_ENV: &str = "THA_API_URL";
/// Environment variable overriding the introspection request timeout, in seconds.
pub const API_TIMEOUT_ENV: &str = "THA_API_TIMEOUT_SECS";

/// Runtime settings for the gate's remote authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
	/// Base URL every `/api/v1/...` endpoint is resolved against.
	pub api_base_url: Url,
	/// Upper bound for a single authority call.
	pub request_timeout: std::time::Duration,
}
impl GateConfig {
	/// Timeout applied when [`API_TIMEOUT_ENV`] is unset.
	pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

	/// Creates a config for `api_base_url` with the default timeout.
	pub fn new(api_base_url: Url) -> Result<Self, ConfigError> {
		http::endpoint_url(&api_base_url, &http::INTROSPECTION_PATH)?;

		Ok(Self { api_base_url, request_timeout: Self::DEFAULT_REQUEST_TIMEOUT })
	}

	/// Overrides the request timeout.
	pub fn with_request_timeout(mut self, timeout: std::time::Duration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Reads the configuration from the process environment.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::MissingEnv`] when `THA_API_URL` is unset and
	/// [`ConfigError::InvalidEnv`] / [`ConfigError::InvalidBaseUrl`] when a value cannot be used.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Parses the configuration from an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&'static str) -> Option<String>,
	{
		let raw_url = lookup(API_URL_ENV)
			.filter(|value| !value.trim().is_empty())
			.ok_or(ConfigError::MissingEnv { name: API_URL_ENV })?;
		let api_base_url = Url::parse(raw_url.trim())
			.map_err(|e| ConfigError::InvalidEnv { name: API_URL_ENV, reason: e.to_string() })?;
		let mut config = Self::new(api_base_url)?;

		if let Some(raw_timeout) = lookup(API_TIMEOUT_ENV) {
			let secs = raw_timeout.trim().parse::<u64>().map_err(|e| ConfigError::InvalidEnv {
				name: API_TIMEOUT_ENV,
				reason: e.to_string(),
			})?;

			if secs == 0 {
				return Err(ConfigError::InvalidEnv {
					name: API_TIMEOUT_ENV,
					reason: "timeout must be positive".into(),
				});
			}

			config = config.with_request_timeout(std::time::Duration::from_secs(secs));
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup<'a>(pairs: &'a [(&'static str, &'a str)]) -> impl Fn(&'static str) -> Option<String> {
		move |name| pairs.iter().find(|(key, _)| *key == name).map(|(_, value)| value.to_string())
	}

	#[test]
	fn reads_base_url_and_default_timeout() {
		let config = GateConfig::from_lookup(lookup(&[(API_URL_ENV, "https://api.example.com")]))
			.expect("Config should load from a valid base URL.");

		assert_eq!(config.api_base_url.as_str(), "https://api.example.com/");
		assert_eq!(config.request_timeout, GateConfig::DEFAULT_REQUEST_TIMEOUT);
	}

	#[test]
	fn timeout_override_is_parsed() {
		let config = GateConfig::from_lookup(lookup(&[
			(API_URL_ENV, "https://api.example.com"),
			(API_TIMEOUT_ENV, " 5 "),
		]))
		.expect("Config should accept a numeric timeout.");

		assert_eq!(config.request_timeout, std::time::Duration::from_secs(5));
	}

	#[test]
	fn missing_or_invalid_values_are_rejected() {
		assert!(matches!(
			GateConfig::from_lookup(lookup(&[])),
			Err(ConfigError::MissingEnv { name: API_URL_ENV })
		));
		assert!(matches!(
			GateConfig::from_lookup(lookup(&[(API_URL_ENV, "   ")])),
			Err(ConfigError::MissingEnv { name: API_URL_ENV })
		));
		assert!(matches!(
			GateConfig::from_lookup(lookup(&[(API_URL_ENV, "not a url")])),
			Err(ConfigError::InvalidEnv { name: API_URL_ENV, .. })
		));
		assert!(matches!(
			GateConfig::from_lookup(lookup(&[(API_URL_ENV, "mailto:ops@example.com")])),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			GateConfig::from_lookup(lookup(&[
				(API_URL_ENV, "https://api.example.com"),
				(API_TIMEOUT_ENV, "0"),
			])),
			Err(ConfigError::InvalidEnv { name: API_TIMEOUT_ENV, .. })
		));
	}
}
