//! Axum integration: the gate as a `from_fn_with_state` middleware plus `token` cookie helpers.
//!
//! ```ignore
//! let protected = Router::new()
//! 	.route("/backoffice/dashboard", get(dashboard))
//! 	.layer(axum::middleware::from_fn_with_state(gate, access_gate::<ReqwestTokenAuthority>));
//! ```

// crates.io
use axum::{
	extract::{OriginalUri, Request, State},
	middleware::Next,
	response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
// self
use crate::{
	_prelude::*,
	auth::CredentialToken,
	gate::{AccessGate, Verdict},
	http::TokenAuthority,
};

/// Cookie carrying the credential token.
pub const TOKEN_COOKIE: &str = "token";
/// Lifetime of the `token` cookie issued after login (seven days).
pub const TOKEN_COOKIE_MAX_AGE: Duration = Duration::hours(168);

/// Runs the gate for every request that reaches this layer.
///
/// Allowed requests pass through untouched; denied ones get a `307 Temporary Redirect` to the
/// policy's login path. The path checked is the one the client sent, even under `Router::nest`.
pub async fn access_gate<A>(
	State(gate): State<AccessGate<A>>,
	jar: CookieJar,
	request: Request,
	next: Next,
) -> Response
where
	A: ?Sized + TokenAuthority,
{
	let path = request
		.extensions()
		.get::<OriginalUri>()
		.map(|uri| uri.0.path().to_owned())
		.unwrap_or_else(|| request.uri().path().to_owned());
	let token = jar.get(TOKEN_COOKIE).map(|cookie| cookie.value());

	match gate.check(&path, token).await {
		Verdict::Allow(_) => next.run(request).await,
		Verdict::Deny(_) => Redirect::temporary(gate.policy.login_path()).into_response(),
	}
}

/// Builds the `token` cookie handed out after a successful login.
pub fn token_cookie(token: &CredentialToken) -> Cookie<'static> {
	Cookie::build((TOKEN_COOKIE, token.expose().to_owned()))
		.http_only(true)
		.same_site(SameSite::Lax)
		.path("/")
		.max_age(TOKEN_COOKIE_MAX_AGE)
		.build()
}

/// Builds the removal cookie used on logout.
///
/// Only the browser copy goes away; cached verdicts for the token age out on their own.
pub fn clear_token_cookie() -> Cookie<'static> {
	Cookie::build((TOKEN_COOKIE, "")).path("/").max_age(Duration::ZERO).build()
}
