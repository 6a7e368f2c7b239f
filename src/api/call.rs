//! Caller-owned request descriptions that the request layer turns into concrete HTTP requests.

// crates.io
use http::{HeaderMap, HeaderName, HeaderValue, Method, header::CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	api::ACCESS_TOKEN_HEADER,
	auth::TokenSecret,
	error::ConfigError,
	http::ApiRequest,
};

/// Describes one API call without binding it to a session.
///
/// The request layer never mutates an `ApiCall`; each attempt builds a fresh request from a
/// clone of [`headers`](Self::headers), so a retried call can carry a different access token
/// while the caller's value stays untouched.
#[derive(Clone, Debug)]
pub struct ApiCall {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL, query string included.
	pub url: Url,
	/// Caller-supplied headers.
	pub headers: HeaderMap,
	/// Raw request body.
	pub body: Vec<u8>,
}
impl ApiCall {
	/// Creates a call with no headers and an empty body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: Vec::new() }
	}

	/// Shorthand for a `GET` call.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Shorthand for a `POST` call.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: &str, value: &str) -> Self {
		self.url.query_pairs_mut().append_pair(key, value);

		self
	}

	/// Sets a header, replacing any previous value under the same name.
	pub fn header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
		let invalid = || ConfigError::InvalidHeader { name: name.to_owned() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		self.headers.insert(header_name, header_value);

		Ok(self)
	}

	/// Serializes `body` as JSON and sets the content type.
	pub fn json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = serde_json::to_vec(body).map_err(|source| ConfigError::RequestBody { source })?;
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		Ok(self)
	}

	/// Builds the HTTP request for one attempt, attaching `access_token` when present.
	///
	/// Without a token no `access-token` header is added.
	pub fn to_request(&self, access_token: Option<&TokenSecret>) -> Result<ApiRequest, ConfigError> {
		let mut headers = self.headers.clone();

		if let Some(token) = access_token {
			let value = HeaderValue::from_str(token.expose())
				.map_err(|_| ConfigError::InvalidHeader { name: ACCESS_TOKEN_HEADER.into() })?;

			headers.insert(ACCESS_TOKEN_HEADER, value);
		}

		let mut request = http::Request::builder()
			.method(self.method.clone())
			.uri(self.url.as_str())
			.body(self.body.clone())?;

		*request.headers_mut() = headers;

		Ok(request)
	}
}
