//! Login form validation and the authenticate payloads exchanged with the remote API.

// self
use crate::{_prelude::*, auth::CredentialToken};

/// Channel identifier the remote API expects for backoffice logins.
pub const BACKOFFICE_LOGIN_CHANNEL: u8 = 4;

/// Error returned when a login form fails validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum LoginFormError {
	/// Username was empty.
	#[error("Username is required.")]
	MissingUsername,
	/// Password was supplied but empty.
	#[error("Password cannot be empty when supplied.")]
	EmptyPassword,
}

/// Credentials submitted from the backoffice login page.
#[derive(Clone, Deserialize)]
pub struct LoginForm {
	/// Account name.
	pub username: String,
	/// Account password; some accounts authenticate without one.
	#[serde(default)]
	pub password: Option<String>,
}
impl LoginForm {
	/// Creates a form after validation.
	pub fn new(
		username: impl Into<String>,
		password: Option<String>,
	) -> Result<Self, LoginFormError> {
		let form = Self { username: username.into(), password };

		form.validate()?;

		Ok(form)
	}

	/// Checks the field rules without consuming the form.
	pub fn validate(&self) -> Result<(), LoginFormError> {
		if self.username.is_empty() {
			return Err(LoginFormError::MissingUsername);
		}
		if self.password.as_deref().is_some_and(str::is_empty) {
			return Err(LoginFormError::EmptyPassword);
		}

		Ok(())
	}

	#[cfg(feature = "reqwest")]
	pub(crate) fn to_request(&self) -> AuthenticateRequest<'_> {
		AuthenticateRequest {
			username: &self.username,
			password: self.password.as_deref().unwrap_or_default(),
			ip_address: "",
			login_by: BACKOFFICE_LOGIN_CHANNEL,
		}
	}
}
impl Debug for LoginForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginForm")
			.field("username", &self.username)
			.field("password", &self.password.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

/// Wire body for the authenticate endpoint.
#[cfg(feature = "reqwest")]
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthenticateRequest<'a> {
	pub(crate) username: &'a str,
	pub(crate) password: &'a str,
	#[serde(rename = "IPAddress")]
	pub(crate) ip_address: &'a str,
	pub(crate) login_by: u8,
}

/// Profile and token returned by a successful authentication.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticatedUser {
	/// Numeric user identifier.
	pub user_id: i64,
	/// Display name.
	pub full_name: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Numeric role identifier.
	pub role_id: i64,
	/// Human-readable role label.
	pub role_name: String,
	/// Credential to store in the `token` cookie.
	pub token: CredentialToken,
}
