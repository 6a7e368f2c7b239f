//! Client configuration: where the API lives, which paths it exposes, and where users land after
//! signing in.

/// Builder API for assembling client configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, api::ApiPaths, error::ConfigError};

/// Validated configuration consumed by [`Client`](crate::flows::Client).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Origin every endpoint path is resolved against.
	pub base_url: Url,
	/// Endpoint paths.
	pub paths: ApiPaths,
	/// Post-sign-in target used when no redirect was recorded.
	pub default_redirect: String,
}
impl ClientConfig {
	/// Redirect target used when the builder is not given one.
	pub const DEFAULT_REDIRECT: &'static str = "/";

	/// Creates a new builder rooted at `base_url`.
	pub fn builder(base_url: Url) -> ClientConfigBuilder {
		ClientConfigBuilder::new(base_url)
	}

	/// Resolves an endpoint path against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path)
			.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoints_resolve_against_origin() {
		let config = ClientConfig::builder(
			Url::parse("http://localhost:8080").expect("Base URL should parse."),
		)
		.build()
		.expect("Config should build.");
		let url = config.endpoint(&config.paths.refresh).expect("Refresh path should resolve.");

		assert_eq!(url.as_str(), "http://localhost:8080/api/gcs/auth/refresh");
		assert_eq!(config.default_redirect, ClientConfig::DEFAULT_REDIRECT);
	}
}
