//! Gate-level error types shared across the transport and configuration layers.

// self
use crate::_prelude::*;

/// Gate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
///
/// The gate itself never surfaces these to requesters; every variant collapses into a
/// redirect. The distinction exists for logs, metrics, and direct callers of the transport.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Authority answered with an unexpected payload.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),

	/// Authority answered with a non-success HTTP status.
	#[error("Token authority responded with HTTP status {status}.")]
	Upstream {
		/// HTTP status code returned by the authority.
		status: u16,
	},
	/// Authority rejected the submitted credentials.
	#[error("Authority rejected the credentials: {reason}.")]
	Rejected {
		/// Authority- or gate-supplied reason string.
		reason: String,
	},
}
impl Error {
	/// Returns `true` when the failure is a malformed payload rather than an unreachable
	/// authority.
	pub fn is_protocol_violation(&self) -> bool {
		matches!(self, Self::Protocol(_))
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Required environment variable is absent.
	#[error("Environment variable `{name}` is required.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds a value that cannot be parsed.
	#[error("Environment variable `{name}` is invalid: {reason}.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Parser-supplied reason string.
		reason: String,
	},
	/// API base URL cannot be extended with endpoint path segments.
	#[error("API base URL `{url}` cannot carry endpoint paths.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token authority.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call exceeded the configured request timeout.
	#[error("Request timed out while calling the token authority.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Payload-shape violations raised while decoding authority responses.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// Body could not be decoded into the result envelope.
	#[error("Token authority returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Envelope `Status` flag was not `true`.
	#[error("Token authority reported an unsuccessful status.")]
	Unsuccessful {
		/// `errorMessage` from the envelope, when present.
		message: Option<String>,
	},
	/// Envelope `Result` field held something other than a boolean.
	#[error("Token authority returned a {found} result where a boolean was expected.")]
	NonBooleanResult {
		/// JSON type name of the value that was found.
		found: &'static str,
	},
}
