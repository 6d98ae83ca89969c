//! Fixed routing policy: which paths the gate guards and where denials go.

// self
use crate::_prelude::*;

/// Route policy consulted before any token inspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatePolicy {
	protected_prefix: &'static str,
	excluded_paths: &'static [&'static str],
	login_path: &'static str,
	cache_ttl: Duration,
}
impl GatePolicy {
	/// Prefix whose paths require a live token.
	pub const PROTECTED_PREFIX: &'static str = "/backoffice";
	/// Literal paths under the prefix that stay reachable without a token.
	pub const EXCLUDED_PATHS: &'static [&'static str] = &["/backoffice/login", "/backoffice/guest"];
	/// Redirect target for denied requests.
	pub const LOGIN_PATH: &'static str = "/backoffice/login";
	/// How long an authority verdict is honored.
	pub const CACHE_TTL: Duration = Duration::minutes(5);

	/// Overrides the cache window; negative windows collapse to zero (never honored).
	pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
		self.cache_ttl = if ttl.is_negative() { Duration::ZERO } else { ttl };

		self
	}

	/// Returns `true` for the prefix itself and every path below it.
	pub fn is_protected(&self, path: &str) -> bool {
		path.strip_prefix(self.protected_prefix)
			.is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
	}

	/// Returns `true` when `path` exactly matches an excluded literal.
	pub fn is_excluded(&self, path: &str) -> bool {
		self.excluded_paths.iter().any(|excluded| *excluded == path)
	}

	/// Redirect target for denied requests.
	pub fn login_path(&self) -> &'static str {
		self.login_path
	}

	/// Window an authority verdict stays honored.
	pub fn cache_ttl(&self) -> Duration {
		self.cache_ttl
	}
}
impl Default for GatePolicy {
	fn default() -> Self {
		Self {
			protected_prefix: Self::PROTECTED_PREFIX,
			excluded_paths: Self::EXCLUDED_PATHS,
			login_path: Self::LOGIN_PATH,
			cache_ttl: Self::CACHE_TTL,
		}
	}
}
