//! Shared helpers for procedures: dispatching, status classification, header extraction, and body
//! decoding.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::{ApiCall, ErrorBody},
	auth::TokenSecret,
	error::{ApiError, ProtocolError, TransportError},
	flows::Client,
	http::{ApiHttpClient, ApiResponse},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Sends one attempt of `call`, without any refresh or retry.
	pub(crate) async fn dispatch(
		&self,
		call: &ApiCall,
		access_token: Option<&TokenSecret>,
	) -> Result<ApiResponse> {
		let request = call.to_request(access_token)?;
		let response =
			self.http_client.call(request).await.map_err(TransportError::network)?;

		ensure_success(response)
	}
}

/// Turns non-2xx responses into [`ApiError`], decoding the `{code, message}` body when present.
pub(crate) fn ensure_success(response: ApiResponse) -> Result<ApiResponse> {
	let status = response.status();

	if status.is_success() {
		return Ok(response);
	}

	let body = serde_json::from_slice::<ErrorBody>(response.body()).ok();

	Err(ApiError::new(status.as_u16(), body).into())
}

/// Reads a token from a response header; absent, empty, or non-UTF-8 values count as missing.
pub(crate) fn header_secret(response: &ApiResponse, name: &'static str) -> Option<TokenSecret> {
	response
		.headers()
		.get(name)
		.and_then(|value| value.to_str().ok())
		.and_then(TokenSecret::non_empty)
}

/// Like [`header_secret`], but treats absence as a protocol violation.
pub(crate) fn require_header_secret(
	response: &ApiResponse,
	name: &'static str,
) -> Result<TokenSecret> {
	header_secret(response, name).ok_or_else(|| ProtocolError::MissingHeader { header: name }.into())
}

/// Decodes a JSON body, treating an empty body as `null` so unit-like targets decode.
pub(crate) fn decode_json<T>(response: ApiResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status().as_u16();
	let body = response.into_body();
	let bytes: &[u8] = if body.is_empty() { b"null" } else { &body };
	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProtocolError::Decode { source, status }.into())
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::StatusCode;
	// self
	use super::*;
	use crate::{api::ApiErrorCode, auth::UserProfile};

	fn response(status: u16, body: &str) -> ApiResponse {
		let mut response = ApiResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = StatusCode::from_u16(status).expect("Status should be valid.");

		response
	}

	#[test]
	fn error_statuses_decode_error_body() {
		let err = ensure_success(response(400, "{\"code\":8,\"message\":\"Token not found\"}"))
			.expect_err("400 responses must fail.");

		assert_eq!(err.status(), Some(400));
		assert_eq!(err.api_code(), Some(ApiErrorCode::TokenNotFound));
		assert!(err.is_auth_failure());
	}

	#[test]
	fn error_statuses_tolerate_foreign_bodies() {
		let err = ensure_success(response(502, "<html>bad gateway</html>"))
			.expect_err("502 responses must fail.");

		assert_eq!(err.status(), Some(502));
		assert!(err.body().is_none());
	}

	#[test]
	fn empty_header_is_missing() {
		let mut ok = response(200, "");

		ok.headers_mut().insert("access-token", "".parse().expect("Header should parse."));

		assert!(header_secret(&ok, "access-token").is_none());
		assert!(matches!(
			require_header_secret(&ok, "refresh-token"),
			Err(Error::Protocol(ProtocolError::MissingHeader { header: "refresh-token" }))
		));
	}

	#[test]
	fn decode_reports_offending_path() {
		decode_json::<()>(response(200, "")).expect("Empty bodies should decode into unit.");

		let err = decode_json::<UserProfile>(response(200, "{\"id\":7}"))
			.expect_err("Numeric ids must be rejected.");

		match err {
			Error::Protocol(ProtocolError::Decode { source, status }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "id");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}
}
