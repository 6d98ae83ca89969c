//! Serves a tiny backoffice behind the access gate, using the remote API configured through
//! `THA_API_URL` for both login and token introspection.
//!
//! ```sh
//! THA_API_URL=https://api.example.com RUST_LOG=backoffice_gate=debug \
//! 	cargo run --example backoffice_server
//! ```

// std
use std::{net::SocketAddr, sync::Arc};
// crates.io
use axum::{
	Form, Router,
	extract::State,
	middleware,
	response::{Html, IntoResponse, Redirect, Response},
	routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use color_eyre::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
// self
use backoffice_gate::{
	auth::LoginForm,
	config::GateConfig,
	gate::{AccessGate, GatePolicy},
	http::ReqwestTokenAuthority,
	middleware::{access_gate, clear_token_cookie, token_cookie},
	store::MemoryStore,
};

const LISTEN_ADDR_ENV: &str = "BACKOFFICE_LISTEN_ADDR";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
const PURGE_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	dotenv::dotenv().ok();
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(tracing_subscriber::fmt::layer())
		.init();

	let config = GateConfig::from_env()?;
	let store = MemoryStore::default();
	let gate = AccessGate::from_config(&config, Arc::new(store.clone()))?;
	let authority = gate.authority.clone();

	tokio::spawn(purge_periodically(store));

	let app = Router::new()
		.route("/", get(|| async { Redirect::to("/backoffice") }))
		.route("/backoffice", get(dashboard))
		.route("/backoffice/login", get(login_page).post(login))
		.route("/backoffice/logout", get(logout))
		.layer(middleware::from_fn_with_state(gate, access_gate::<ReqwestTokenAuthority>))
		.with_state(authority);
	let addr = std::env::var(LISTEN_ADDR_ENV)
		.unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into())
		.parse::<SocketAddr>()?;

	tracing::info!(%addr, api = %config.api_base_url, "backoffice listening");

	axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

	Ok(())
}

async fn purge_periodically(store: MemoryStore) {
	let mut ticker = tokio::time::interval(PURGE_INTERVAL);

	loop {
		ticker.tick().await;

		let purged = store.purge_stale(time::OffsetDateTime::now_utc());

		if purged > 0 {
			tracing::debug!(purged, remaining = store.len(), "purged stale verdicts");
		}
	}
}

async fn dashboard() -> Html<&'static str> {
	Html(
		"<h1>Backoffice</h1><p>Signed in.</p><p><a href=\"/backoffice/logout\">Sign out</a></p>",
	)
}

async fn login_page() -> Html<String> {
	render_login(None)
}

async fn login(
	State(authority): State<Arc<ReqwestTokenAuthority>>,
	jar: CookieJar,
	Form(form): Form<LoginForm>,
) -> Response {
	if let Err(e) = form.validate() {
		return render_login(Some(&e.to_string())).into_response();
	}

	match authority.authenticate(&form).await {
		Ok(user) => {
			tracing::info!(user_id = user.user_id, role = %user.role_name, "backoffice login");

			(jar.add(token_cookie(&user.token)), Redirect::to("/backoffice")).into_response()
		},
		Err(e) => {
			tracing::warn!(error = %e, username = %form.username, "backoffice login failed");

			render_login(Some("Sign-in failed.")).into_response()
		},
	}
}

async fn logout(jar: CookieJar) -> impl IntoResponse {
	(jar.add(clear_token_cookie()), Redirect::to(GatePolicy::LOGIN_PATH))
}

fn render_login(notice: Option<&str>) -> Html<String> {
	let notice = notice.map(|text| format!("<p class=\"notice\">{text}</p>")).unwrap_or_default();

	Html(format!(
		"<h1>Backoffice login</h1>{notice}\
		<form method=\"post\" action=\"/backoffice/login\">\
		<input name=\"username\" placeholder=\"Username\">\
		<input name=\"password\" type=\"password\" placeholder=\"Password\">\
		<button type=\"submit\">Sign in</button></form>"
	))
}
