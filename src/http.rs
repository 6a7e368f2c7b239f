//! Transport primitives for API calls.
//!
//! [`ApiHttpClient`] is the crate's only dependency on an HTTP stack. Implementations resolve
//! every HTTP response, whatever its status, into an [`ApiResponse`]; only failures that leave
//! no response behind (DNS, TCP, TLS, IO) are reported as transport errors. Status handling and
//! the refresh/retry policy live in the request layer on top.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// HTTP request handed to the transport.
pub type ApiRequest = ::http::Request<Vec<u8>>;
/// HTTP response returned by the transport.
pub type ApiResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`ApiHttpClient::call`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing API calls.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by every
/// clone of the request layer, and their futures must be `Send` so calls can hop executors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes a single request.
	fn call(&self, request: ApiRequest) -> HttpFuture<'_, Result<ApiResponse, Self::TransportError>>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn call(&self, request: ApiRequest) -> HttpFuture<'_, Result<ApiResponse, ReqwestError>> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = ApiResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
