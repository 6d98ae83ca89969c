//! Transport primitives for talking to the remote token authority.
//!
//! [`TokenAuthority`] is the gate's only dependency on an HTTP stack. The crate ships
//! [`ReqwestTokenAuthority`], which speaks the remote API's `ApiEnvelope` result model; hosts
//! with their own client (or tests that need a scripted authority) implement the trait
//! directly. Payload decoding lives in free functions so every transport classifies malformed
//! bodies the same way.

// crates.io
use serde::de::DeserializeOwned;
#[cfg(feature = "reqwest")] use reqwest::{ClientBuilder, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::CredentialToken,
	error::{ConfigError, ProtocolError},
};
#[cfg(feature = "reqwest")]
use crate::{
	auth::{AuthenticatedUser, LoginForm},
	config::GateConfig,
	error::TransportError,
};

/// Path segments of the introspection endpoint, relative to the API base URL.
pub const INTROSPECTION_PATH: [&str; 4] = ["api", "v1", "Authorize", "IsExpireToken"];
/// Path segments of the authenticate endpoint, relative to the API base URL.
pub const AUTHENTICATE_PATH: [&str; 4] = ["api", "v1", "Authorize", "Authenticate"];

/// Boxed future returned by [`TokenAuthority`] calls.
pub type AuthorityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Remote authority that decides whether a credential token has expired.
///
/// Implementations must be `Send + Sync + 'static` so a single instance can back every
/// concurrent gate invocation. Calls must be free of side effects: the gate may issue
/// duplicate checks for the same token when requests race.
pub trait TokenAuthority
where
	Self: 'static + Send + Sync,
{
	/// Resolves to `true` when the authority reports `token` as expired.
	///
	/// Any transport failure, non-success status, or malformed payload must surface as an
	/// [`Error`]; the gate treats all of them as "not authenticated".
	fn is_expired<'a>(&'a self, token: &'a CredentialToken) -> AuthorityFuture<'a, bool>;
}

/// Result model shared by every remote API endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiEnvelope<T> {
	/// Success flag.
	#[serde(rename = "Status")]
	pub status: bool,
	/// Endpoint-specific payload.
	#[serde(rename = "Result")]
	pub result: Option<T>,
	/// Remote validation flag; informational only.
	#[serde(rename = "errorCheck", default)]
	pub error_check: bool,
	/// Remote error description.
	#[serde(rename = "errorMessage", default)]
	pub error_message: Option<String>,
}

/// Decodes a raw response body into an [`ApiEnvelope`], keeping the failing JSON path.
pub fn decode_envelope<T>(body: &[u8]) -> Result<ApiEnvelope<T>, ProtocolError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| ProtocolError::Parse { source })
}

/// Decodes an introspection body into the "token is expired" flag.
///
/// Only `{ "Status": true, "Result": <bool> }` is accepted; every other shape is a
/// [`ProtocolError`].
pub fn decode_introspection(body: &[u8]) -> Result<bool, ProtocolError> {
	let envelope = decode_envelope::<serde_json::Value>(body)?;

	if !envelope.status {
		return Err(ProtocolError::Unsuccessful { message: envelope.error_message });
	}

	match envelope.result {
		Some(serde_json::Value::Bool(is_expired)) => Ok(is_expired),
		Some(other) => Err(ProtocolError::NonBooleanResult { found: json_kind(&other) }),
		None => Err(ProtocolError::NonBooleanResult { found: "null" }),
	}
}

/// Appends `segments` to the API base URL.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ConfigError> {
	let mut url = base.clone();

	url.path_segments_mut()
		.map_err(|_| ConfigError::InvalidBaseUrl { url: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
	match value {
		serde_json::Value::Null => "null",
		serde_json::Value::Bool(_) => "boolean",
		serde_json::Value::Number(_) => "number",
		serde_json::Value::String(_) => "string",
		serde_json::Value::Array(_) => "array",
		serde_json::Value::Object(_) => "object",
	}
}

/// Reqwest-backed authority that calls the remote API's `Authorize` endpoints.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTokenAuthority {
	client: ReqwestClient,
	introspection_url: Url,
	authenticate_url: Url,
}
#[cfg(feature = "reqwest")]
impl ReqwestTokenAuthority {
	/// Builds an authority for `base_url` bounded by
	/// [`GateConfig::DEFAULT_REQUEST_TIMEOUT`].
	pub fn new(base_url: &Url) -> Result<Self> {
		Self::from_config(&GateConfig::new(base_url.clone())?)
	}

	/// Wraps an existing reqwest client.
	///
	/// The client's timeout, if any, bounds every introspection call; a timed-out call is a
	/// transport failure.
	pub fn with_client(client: ReqwestClient, base_url: &Url) -> Result<Self> {
		Ok(Self {
			client,
			introspection_url: endpoint_url(base_url, &INTROSPECTION_PATH)?,
			authenticate_url: endpoint_url(base_url, &AUTHENTICATE_PATH)?,
		})
	}

	/// Builds an authority whose client honors the configured request timeout.
	pub fn from_config(config: &GateConfig) -> Result<Self> {
		Self::from_config_with_builder(config, ReqwestClient::builder())
	}

	/// Like [`from_config`](Self::from_config), but starts from a caller-tuned client builder
	/// (TLS roots, proxies). The configured timeout always overrides the builder's.
	pub fn from_config_with_builder(config: &GateConfig, builder: ClientBuilder) -> Result<Self> {
		let client = builder.timeout(config.request_timeout).build().map_err(ConfigError::from)?;

		Self::with_client(client, &config.api_base_url)
	}

	/// Returns the fully qualified introspection endpoint (without the token query).
	pub fn introspection_url(&self) -> &Url {
		&self.introspection_url
	}

	/// Exchanges login credentials for an [`AuthenticatedUser`] carrying a fresh token.
	pub async fn authenticate(&self, form: &LoginForm) -> Result<AuthenticatedUser> {
		let response = self
			.client
			.post(self.authenticate_url.clone())
			.json(&form.to_request())
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::Upstream { status: status.as_u16() });
		}

		let body = response.bytes().await.map_err(TransportError::from)?;
		let envelope = decode_envelope::<AuthenticatedUser>(&body)?;

		match envelope {
			ApiEnvelope { status: true, result: Some(user), .. } => Ok(user),
			ApiEnvelope { error_message, .. } => Err(Error::Rejected {
				reason: error_message
					.filter(|message| !message.is_empty())
					.unwrap_or_else(|| "Authentication failed".into()),
			}),
		}
	}

	async fn introspect(&self, token: &CredentialToken) -> Result<bool> {
		let mut url = self.introspection_url.clone();

		url.query_pairs_mut().append_pair("token", token.expose());

		let response = self
			.client
			.get(url)
			.header(CONTENT_TYPE, "application/json")
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::Upstream { status: status.as_u16() });
		}

		let body = response.bytes().await.map_err(TransportError::from)?;

		Ok(decode_introspection(&body)?)
	}
}
#[cfg(feature = "reqwest")]
impl TokenAuthority for ReqwestTokenAuthority {
	fn is_expired<'a>(&'a self, token: &'a CredentialToken) -> AuthorityFuture<'a, bool> {
		Box::pin(self.introspect(token))
	}
}
