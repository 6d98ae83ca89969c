//! Shared fixtures for integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use time::{OffsetDateTime, macros};
// self
use backoffice_gate::{
	config::GateConfig,
	gate::{AccessGate, ReqwestAccessGate},
	http::ReqwestTokenAuthority,
	reqwest::{Client, ClientBuilder},
	store::MemoryStore,
	url::Url,
};

pub const INTROSPECTION: &str = "/api/v1/Authorize/IsExpireToken";
pub const AUTHENTICATE: &str = "/api/v1/Authorize/Authenticate";
pub const NOW: OffsetDateTime = macros::datetime!(2025-06-01 12:00 UTC);

/// Builds a reqwest-backed gate pointed at `server` plus a handle on its shared cache.
pub fn build_reqwest_gate(server: &MockServer) -> (ReqwestAccessGate, MemoryStore) {
	let authority = build_reqwest_authority(&server.base_url());
	let store = MemoryStore::default();

	(AccessGate::new(Arc::new(authority), Arc::new(store.clone())), store)
}

/// Client builder that accepts the self-signed certificates produced by `httpmock`.
pub fn test_client_builder() -> ClientBuilder {
	Client::builder().danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true)
}

pub fn build_reqwest_authority(base_url: &str) -> ReqwestTokenAuthority {
	build_reqwest_authority_with_timeout(base_url, GateConfig::DEFAULT_REQUEST_TIMEOUT)
}

pub fn build_reqwest_authority_with_timeout(
	base_url: &str,
	timeout: std::time::Duration,
) -> ReqwestTokenAuthority {
	let base = Url::parse(base_url).expect("Mock server base URL should parse.");
	let config = GateConfig::new(base)
		.expect("Mock server base URL should accept endpoint paths.")
		.with_request_timeout(timeout);

	ReqwestTokenAuthority::from_config_with_builder(&config, test_client_builder())
		.expect("Insecure test client should build.")
}

pub fn introspection_body(is_expired: bool) -> String {
	format!("{{\"Status\":true,\"Result\":{is_expired},\"errorCheck\":false,\"errorMessage\":null}}")
}
