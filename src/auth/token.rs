//! Opaque credential token carried in the `token` cookie.

// crates.io
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const FINGERPRINT_BYTES: usize = 6;

/// Redacted wrapper around the opaque token string the gate validates.
///
/// The gate assumes no internal structure; validity is decided by the remote authority.
/// Values are never rendered by [`Debug`] or [`Display`], so logs carry
/// [`fingerprint`](CredentialToken::fingerprint) instead.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct CredentialToken(String);
impl CredentialToken {
	/// Wraps a token value as-is.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Interprets a raw cookie value.
	///
	/// Returns `None` when the cookie is absent or blank after trimming. The wrapped value keeps
	/// the original, untrimmed text.
	pub fn from_cookie(value: Option<&str>) -> Option<Self> {
		value.filter(|raw| !raw.trim().is_empty()).map(Self::new)
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Short hex digest that identifies the token in logs without revealing it.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(self.0.as_bytes());

		digest[..FINGERPRINT_BYTES].iter().map(|byte| format!("{byte:02x}")).collect()
	}
}
impl AsRef<str> for CredentialToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for CredentialToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("CredentialToken").field(&"<redacted>").finish()
	}
}
impl Display for CredentialToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_formatters_redact() {
		let token = CredentialToken::new("super-secret");

		assert_eq!(format!("{token:?}"), "CredentialToken(\"<redacted>\")");
		assert_eq!(format!("{token}"), "<redacted>");
	}

	#[test]
	fn blank_cookies_yield_no_token() {
		assert!(CredentialToken::from_cookie(None).is_none());
		assert!(CredentialToken::from_cookie(Some("")).is_none());
		assert!(CredentialToken::from_cookie(Some(" \t\n")).is_none());

		let token = CredentialToken::from_cookie(Some(" padded "))
			.expect("Non-blank cookie values should produce a token.");

		assert_eq!(token.expose(), " padded ");
	}

	#[test]
	fn fingerprint_is_stable_and_short() {
		let a = CredentialToken::new("token-a");
		let b = CredentialToken::new("token-b");

		assert_eq!(a.fingerprint(), CredentialToken::new("token-a").fingerprint());
		assert_ne!(a.fingerprint(), b.fingerprint());
		assert_eq!(a.fingerprint().len(), FINGERPRINT_BYTES * 2);
		assert!(!a.fingerprint().contains("token"));
	}
}
