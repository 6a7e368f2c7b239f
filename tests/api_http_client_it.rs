#![cfg(feature = "reqwest")]

// std
use std::collections::VecDeque;
// self
use gcs_session::{
	_preludet::*,
	api::ApiCall,
	auth::{Session, TokenSecret},
	config::ClientConfig,
	context::SessionContext,
	error::TransportError,
	flows::Client,
	http::{ApiHttpClient, ApiRequest, ApiResponse, HttpFuture},
};

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Host unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

type Scripted = Result<ApiResponse, FakeTransportError>;

/// Replays scripted responses in order and records every request it receives.
#[derive(Default)]
struct ScriptedHttpClient {
	script: Mutex<VecDeque<Scripted>>,
	seen: Mutex<Vec<ApiRequest>>,
}
impl ScriptedHttpClient {
	fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
		Self { script: Mutex::new(script.into_iter().collect()), seen: Default::default() }
	}

	fn seen_header(&self, index: usize, name: &str) -> Option<String> {
		self.seen.lock()[index]
			.headers()
			.get(name)
			.map(|value| value.to_str().expect("Header should be ASCII.").to_owned())
	}
}
impl ApiHttpClient for ScriptedHttpClient {
	type TransportError = FakeTransportError;

	fn call(
		&self,
		request: ApiRequest,
	) -> HttpFuture<'_, Result<ApiResponse, Self::TransportError>> {
		self.seen.lock().push(request);

		let next = self.script.lock().pop_front().expect("Script should cover every request.");

		Box::pin(async move { next })
	}
}

fn respond(status: u16, headers: &[(&'static str, &'static str)], body: &str) -> Scripted {
	let mut builder = http::Response::builder().status(status);

	for (name, value) in headers {
		builder = builder.header(*name, *value);
	}

	Ok(builder.body(body.as_bytes().to_vec()).expect("Scripted response should build."))
}

fn client_with(script: impl IntoIterator<Item = Scripted>) -> Client<ScriptedHttpClient> {
	let config = ClientConfig::builder(
		Url::parse("https://gcs.example.com").expect("Base URL should parse."),
	)
	.build()
	.expect("Client config should build.");
	let context = Arc::new(SessionContext::ephemeral());

	context.set(Session::new(TokenSecret::new("access-1"), TokenSecret::new("refresh-R")));

	Client::with_http_client(config, context, ScriptedHttpClient::new(script))
}

#[tokio::test]
async fn transport_failures_are_not_retried() {
	let client = client_with([Err(FakeTransportError::Unreachable)]);
	let url = client.config.endpoint("/api/gcs/repository/list").expect("Endpoint should resolve.");
	let err = client
		.execute_raw(&ApiCall::get(url))
		.await
		.expect_err("Transport failures must propagate.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(client.http_client.seen.lock().len(), 1);
	assert!(client.context.get().is_authenticated());
}

#[tokio::test]
async fn custom_transport_sees_refresh_between_attempts() {
	let client = client_with([
		respond(401, &[], "{\"code\":6,\"message\":\"Token expired\"}"),
		respond(200, &[("access-token", "access-2")], ""),
		respond(200, &[], "{\"name\":\"gcs\"}"),
	]);
	let url = client.config.endpoint("/api/gcs/repository/get").expect("Endpoint should resolve.");
	let call = ApiCall::get(url).query("repositoryName", "gcs");
	let response = client.execute_raw(&call).await.expect("Retried call should succeed.");

	assert_eq!(response.status(), 200);
	assert_eq!(response.body().as_slice(), b"{\"name\":\"gcs\"}");

	let http = &client.http_client;

	assert_eq!(http.seen.lock().len(), 3);
	assert_eq!(http.seen_header(0, "access-token").as_deref(), Some("access-1"));
	assert_eq!(http.seen_header(1, "access-token"), None);
	assert_eq!(http.seen_header(1, "refresh-token").as_deref(), Some("refresh-R"));
	assert_eq!(http.seen.lock()[1].uri().path(), "/api/gcs/auth/refresh");
	assert_eq!(http.seen_header(2, "access-token").as_deref(), Some("access-2"));
	assert_eq!(http.seen.lock()[2].uri().query(), Some("repositoryName=gcs"));
}
