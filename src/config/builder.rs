// self
use crate::{_prelude::*, api::ApiPaths, config::ClientConfig};

/// Errors raised while constructing or validating client configurations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL must use HTTP or HTTPS.
	#[error("The API base URL must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL cannot have paths joined onto it.
	#[error("The API base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// URL that failed validation.
		url: String,
	},
	/// Redirect targets are in-app absolute paths.
	#[error("Redirect target must be an absolute path: {target:?}.")]
	InvalidRedirect {
		/// Target that failed validation.
		target: String,
	},
	/// Endpoint paths must be non-empty absolute paths.
	#[error("The {endpoint} endpoint path must be an absolute path: {path:?}.")]
	InvalidPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Path that failed validation.
		path: String,
	},
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// Base URL for every endpoint.
	pub base_url: Url,
	/// Endpoint paths.
	pub paths: ApiPaths,
	/// Post-sign-in fallback target.
	pub default_redirect: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder with the default endpoint table.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			paths: ApiPaths::default(),
			default_redirect: ClientConfig::DEFAULT_REDIRECT.into(),
		}
	}

	/// Overrides the endpoint table.
	pub fn paths(mut self, paths: ApiPaths) -> Self {
		self.paths = paths;

		self
	}

	/// Overrides the post-sign-in fallback target.
	pub fn default_redirect(mut self, target: impl Into<String>) -> Self {
		self.default_redirect = target.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let config = ClientConfig {
			base_url: self.base_url,
			paths: self.paths,
			default_redirect: self.default_redirect,
		};

		config.validate()?;

		Ok(config)
	}
}

impl ClientConfig {
	fn validate(&self) -> Result<(), ClientConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ClientConfigError::UnsupportedScheme { url: self.base_url.to_string() });
		}
		if self.base_url.cannot_be_a_base() {
			return Err(ClientConfigError::CannotBeABase { url: self.base_url.to_string() });
		}
		if !self.default_redirect.starts_with('/') {
			return Err(ClientConfigError::InvalidRedirect {
				target: self.default_redirect.clone(),
			});
		}

		let paths = &self.paths;

		for (endpoint, path) in [
			("sign-in", &paths.sign_in),
			("sign-out", &paths.sign_out),
			("refresh", &paths.refresh),
			("get-user", &paths.get_user),
			("username check", &paths.check_username),
			("email check", &paths.check_email),
			("password check", &paths.check_password),
			("SSH key name check", &paths.check_ssh_key_name),
			("SSH public key check", &paths.check_ssh_key_public_key),
			("repository name check", &paths.check_repository_name),
		] {
			validate_path(endpoint, path)?;
		}

		Ok(())
	}
}

fn validate_path(endpoint: &'static str, path: &str) -> Result<(), ClientConfigError> {
	if path.len() > 1 && path.starts_with('/') {
		Ok(())
	} else {
		Err(ClientConfigError::InvalidPath { endpoint, path: path.to_owned() })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Failed to parse test URL.")
	}

	#[test]
	fn rejects_non_http_base() {
		let err = ClientConfig::builder(url("ftp://example.com"))
			.build()
			.expect_err("FTP base URLs must be rejected.");

		assert!(matches!(err, ClientConfigError::UnsupportedScheme { .. }));

		let err = ClientConfig::builder(url("mailto:someone@example.com"))
			.build()
			.expect_err("Opaque URLs must be rejected.");

		assert!(matches!(err, ClientConfigError::UnsupportedScheme { .. }));
	}

	#[test]
	fn rejects_relative_redirects_and_paths() {
		let err = ClientConfig::builder(url("https://gcs.example.com"))
			.default_redirect("home")
			.build()
			.expect_err("Relative redirects must be rejected.");

		assert!(matches!(err, ClientConfigError::InvalidRedirect { .. }));

		let paths = ApiPaths { refresh: String::new(), ..ApiPaths::default() };
		let err = ClientConfig::builder(url("https://gcs.example.com"))
			.paths(paths)
			.build()
			.expect_err("Empty endpoint paths must be rejected.");

		assert_eq!(
			err,
			ClientConfigError::InvalidPath { endpoint: "refresh", path: String::new() }
		);
	}

	#[test]
	fn accepts_custom_settings() {
		let paths = ApiPaths { get_user: "/v2/me".into(), ..ApiPaths::default() };
		let config = ClientConfig::builder(url("https://gcs.example.com"))
			.paths(paths)
			.default_redirect("/dashboard")
			.build()
			.expect("Custom config should build.");

		assert_eq!(config.paths.get_user, "/v2/me");
		assert_eq!(config.default_redirect, "/dashboard");
	}
}
