mod common;

// crates.io
use httpmock::prelude::*;
// self
use backoffice_gate::{auth::LoginForm, error::Error};
use common::*;

#[tokio::test]
async fn authenticate_returns_the_issued_token() {
	let server = MockServer::start_async().await;
	let authority = build_reqwest_authority(&server.base_url());
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTHENTICATE).json_body(serde_json::json!({
				"Username": "admin",
				"Password": "hunter2",
				"IPAddress": "",
				"LoginBy": 4,
			}));
			then.status(200).header("content-type", "application/json").body(
				"{\"Status\":true,\"Result\":{\"UserId\":1,\"FullName\":\"Ada Lovelace\",\
				 \"FirstName\":\"Ada\",\"LastName\":\"Lovelace\",\"RoleId\":2,\"RoleName\":\"Admin\",\
				 \"Token\":\"issued-token\"},\"errorCheck\":false,\"errorMessage\":null}",
			);
		})
		.await;
	let form = LoginForm::new("admin", Some("hunter2".into()))
		.expect("Login form fixture should be valid.");
	let user = authority.authenticate(&form).await.expect("Authentication should succeed.");

	assert_eq!(user.user_id, 1);
	assert_eq!(user.full_name, "Ada Lovelace");
	assert_eq!(user.token.expose(), "issued-token");

	mock.assert_async().await;
}

#[tokio::test]
async fn authenticate_surfaces_remote_rejections() {
	let server = MockServer::start_async().await;
	let authority = build_reqwest_authority(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTHENTICATE);
			then.status(200).header("content-type", "application/json").body(
				"{\"Status\":false,\"Result\":null,\"errorCheck\":true,\
				 \"errorMessage\":\"Invalid username or password\"}",
			);
		})
		.await;
	let form = LoginForm::new("admin", Some("wrong".into()))
		.expect("Login form fixture should be valid.");
	let err = authority
		.authenticate(&form)
		.await
		.expect_err("Rejected credentials should surface as an error.");

	assert!(matches!(
		err,
		Error::Rejected { ref reason } if reason == "Invalid username or password"
	));
}

#[tokio::test]
async fn authenticate_maps_error_statuses() {
	let server = MockServer::start_async().await;
	let authority = build_reqwest_authority(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTHENTICATE);
			then.status(500);
		})
		.await;
	let form = LoginForm::new("admin", None).expect("Login form fixture should be valid.");
	let err = authority
		.authenticate(&form)
		.await
		.expect_err("Server errors should surface as an error.");

	assert!(matches!(err, Error::Upstream { status: 500 }));
}

#[tokio::test]
async fn empty_rejection_messages_fall_back_to_the_default_reason() {
	let server = MockServer::start_async().await;
	let authority = build_reqwest_authority(&server.base_url());
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTHENTICATE);
			then.status(200).header("content-type", "application/json").body(
				"{\"Status\":false,\"Result\":null,\"errorCheck\":true,\"errorMessage\":\"\"}",
			);
		})
		.await;
	let form = LoginForm::new("admin", Some("wrong".into()))
		.expect("Login form fixture should be valid.");
	let err = authority
		.authenticate(&form)
		.await
		.expect_err("Rejected credentials should surface as an error.");

	assert!(matches!(
		err,
		Error::Rejected { ref reason } if reason == "Authentication failed"
	));
}
