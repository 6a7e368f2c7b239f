//! Crate-level error types shared across the request layer, procedures, and storage tiers.

// self
use crate::{
	_prelude::*,
	api::{ApiErrorCode, ErrorBody},
};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Persistence-tier failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or request-construction problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Network-level failure; no HTTP response was received.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// The API answered with a success status but violated the wire contract.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Local input check failed before any request was issued.
	#[error(transparent)]
	Validation(#[from] ValidationError),
}
impl Error {
	/// HTTP status attached to the failure, if a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(err) => Some(err.status),
			Self::Protocol(ProtocolError::Decode { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// Decoded error body returned by the API, if any.
	pub fn body(&self) -> Option<&ErrorBody> {
		match self {
			Self::Api(err) => err.body.as_ref(),
			_ => None,
		}
	}

	/// Registered error code carried by the API error body, if recognized.
	pub fn api_code(&self) -> Option<ApiErrorCode> {
		self.body().and_then(ErrorBody::known_code)
	}

	/// Whether this failure means the access token must be refreshed.
	///
	/// Holds for `401 Unauthorized`, and for `400 Bad Request` whose body reports
	/// [`ApiErrorCode::TokenNotFound`]. Transport failures never qualify.
	pub fn is_auth_failure(&self) -> bool {
		match self {
			Self::Api(err) => err.is_auth_failure(),
			_ => false,
		}
	}

	/// Whether the API reported that the requested resource does not exist.
	pub fn is_not_found(&self) -> bool {
		self.status() == Some(ApiError::NOT_FOUND)
	}

	/// Message suitable for end users.
	///
	/// Local validation failures describe themselves, API failures surface the server's
	/// message when one was decoded, and everything else collapses into `fallback`.
	pub fn display_message(&self, fallback: &str) -> String {
		match self {
			Self::Validation(err) => err.to_string(),
			Self::Api(ApiError { body: Some(body), .. }) if !body.message.is_empty() =>
				body.message.clone(),
			_ => fallback.to_owned(),
		}
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// An endpoint path could not be joined onto the API base URL.
	#[error("Endpoint path `{path}` cannot be resolved against the API base URL.")]
	InvalidEndpoint {
		/// Offending endpoint path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A header name or value contains characters HTTP does not allow.
	#[error("Header `{name}` has an invalid name or value.")]
	InvalidHeader {
		/// Header name as supplied.
		name: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-success HTTP response returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("API responded with HTTP {status}: {}.", describe_body(.body))]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// Error body, when the response carried a decodable `{code, message}` payload.
	pub body: Option<ErrorBody>,
}
impl ApiError {
	/// `400 Bad Request`.
	pub const BAD_REQUEST: u16 = 400;
	/// `401 Unauthorized`.
	pub const UNAUTHORIZED: u16 = 401;
	/// `404 Not Found`.
	pub const NOT_FOUND: u16 = 404;

	/// Builds an error from a status code and an optional decoded body.
	pub fn new(status: u16, body: Option<ErrorBody>) -> Self {
		Self { status, body }
	}

	/// See [`Error::is_auth_failure`].
	pub fn is_auth_failure(&self) -> bool {
		match self.status {
			Self::UNAUTHORIZED => true,
			Self::BAD_REQUEST => self
				.body
				.as_ref()
				.and_then(ErrorBody::known_code)
				.is_some_and(|code| code == ApiErrorCode::TokenNotFound),
			_ => false,
		}
	}
}

/// Success responses that break the wire contract.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// A header the contract requires was absent or not valid UTF-8.
	#[error("Response is missing the `{header}` header.")]
	MissingHeader {
		/// Header name.
		header: &'static str,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Response body is malformed.")]
	Decode {
		/// Structured parsing failure naming the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Local validation failures raised before any network call.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Username or email was empty.
	#[error("Username or email is required.")]
	MissingIdentifier,
	/// Password was empty.
	#[error("Password is required.")]
	MissingPassword,
	/// Email verification code is not a six-digit code.
	#[error("Verification code must be six digits.")]
	MalformedVerificationCode,
}

fn describe_body(body: &Option<ErrorBody>) -> String {
	match body {
		Some(body) => format!("code {} ({})", body.code, body.message),
		None => "no error body".into(),
	}
}
