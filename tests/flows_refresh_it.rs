#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use gcs_session::{
	_preludet::*,
	auth::{Session, TokenSecret},
};

const REFRESH_PATH: &str = "/api/gcs/auth/refresh";

#[tokio::test]
async fn refresh_replaces_only_the_access_token() {
	let server = MockServer::start_async().await;
	let (client, tiers) = build_reqwest_test_client(&server.base_url());

	client.context.set(Session::new(TokenSecret::new("access-1"), TokenSecret::new("refresh-R")));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(REFRESH_PATH)
				.header("refresh-token", "refresh-R")
				.header_missing("access-token");
			then.status(200).header("access-token", "access-2").header("refresh-token", "rotated");
		})
		.await;

	client.refresh().await;

	mock.assert_async().await;

	let session = client.context.get();

	assert_eq!(session.access_token.as_ref().map(TokenSecret::expose), Some("access-2"));
	assert_eq!(session.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-R"));
	// Refresh alone never writes persistence; the executor does.
	assert!(tiers.volatile.is_empty());
	assert!(tiers.durable.is_empty());
}

#[tokio::test]
async fn refresh_without_refresh_token_skips_the_network() {
	let server = MockServer::start_async().await;
	let (client, _tiers) = build_reqwest_test_client(&server.base_url());

	client.context.set_access_token(Some(TokenSecret::new("stale-access")));

	let mock = server
		.mock_async(|when, then| {
			when.path(REFRESH_PATH);
			then.status(200).header("access-token", "unexpected");
		})
		.await;

	client.refresh().await;

	mock.assert_calls_async(0).await;

	assert!(client.context.get().access_token.is_none());
	assert_eq!(client.refresh_metrics.attempts(), 0);
}

#[tokio::test]
async fn refresh_without_access_header_leaves_access_empty() {
	let server = MockServer::start_async().await;
	let (client, _tiers) = build_reqwest_test_client(&server.base_url());

	client.context.set(Session::new(TokenSecret::new("access-1"), TokenSecret::new("refresh-R")));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(REFRESH_PATH);
			then.status(200).body("{}");
		})
		.await;

	client.refresh().await;

	mock.assert_async().await;

	let session = client.context.get();

	assert!(session.access_token.is_none());
	assert_eq!(session.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-R"));
	assert_eq!(client.refresh_metrics.failures(), 1);
}

#[tokio::test]
async fn refresh_rejection_is_absorbed() {
	let server = MockServer::start_async().await;
	let (client, _tiers) = build_reqwest_test_client(&server.base_url());

	client.context.set(Session::new(TokenSecret::new("access-1"), TokenSecret::new("refresh-R")));

	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(REFRESH_PATH);
			then.status(401).body("{\"code\":6,\"message\":\"Token expired\"}");
		})
		.await;

	client.refresh().await;

	mock.assert_async().await;

	assert!(client.context.get().access_token.is_none());
	// Clearing the rest of the session is the caller's decision.
	assert!(client.context.get().refresh_token.is_some());
}
