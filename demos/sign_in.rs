//! Walks a session through sign-in, a transparently refreshed call, and a restart-style
//! bootstrap against a local mock of the GCS API.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::{Value, json};
use url::Url;
// self
use gcs_session::{
	api::ApiCall,
	config::ClientConfig,
	context::SessionContext,
	flows::{BootstrapOutcome, Client, SignInRequest},
	store::{MemoryStorage, SessionStorage},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let sign_in_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/gcs/auth/signin");
			then.status(200)
				.header("access-token", "demo-access-1")
				.header("refresh-token", "demo-refresh")
				.json_body(json!({ "id": "1", "username": "octo", "email": "octo@example.com" }));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/gcs/repository/list")
				.header("access-token", "demo-access-1");
			then.status(401).json_body(json!({ "code": 6, "message": "Token expired" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/gcs/auth/refresh").header("refresh-token", "demo-refresh");
			then.status(200).header("access-token", "demo-access-2");
		})
		.await;
	let repos_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/gcs/repository/list")
				.header("access-token", "demo-access-2");
			then.status(200).json_body(json!([{ "name": "gcs" }]));
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/gcs/user/get").header("access-token", "demo-access-2");
			then.status(200).json_body(json!({ "id": "1", "username": "octo" }));
		})
		.await;
	let config = ClientConfig::builder(Url::parse(&server.base_url())?).build()?;
	let tab: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::default());
	let durable: Arc<dyn SessionStorage> = Arc::new(MemoryStorage::default());
	let context = SessionContext::new(tab.clone(), durable.clone());
	let client = Client::new(config.clone(), Arc::new(context));

	client.context.remember_redirect("/octo/gcs");

	let signed_in = client.sign_in(SignInRequest::new("octo", "hunter2")).await?;

	println!("Signed in as {}; continue at {}.", signed_in.profile.username, signed_in.redirect);

	let repos_call = ApiCall::get(config.endpoint("/api/gcs/repository/list")?);
	let repos: Value = client.execute(&repos_call).await?;

	println!("Repositories after a transparent refresh: {repos}.");

	// A reload of the same tab keeps both tiers but starts from an empty context.
	let restarted = Client::new(config, Arc::new(SessionContext::new(tab, durable)));

	match restarted.bootstrap().await? {
		BootstrapOutcome::Loaded(profile) | BootstrapOutcome::Cached(profile) =>
			println!("Restored session for {}.", profile.username),
		BootstrapOutcome::Anonymous => println!("No session to restore."),
	}

	sign_in_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	repos_mock.assert_async().await;
	profile_mock.assert_async().await;

	Ok(())
}
