//! Credential exchange: trades a username or email plus password for the token pair and the
//! user's profile.

// self
use crate::{
	_prelude::*,
	api::{ACCESS_TOKEN_HEADER, ApiCall, REFRESH_TOKEN_HEADER},
	auth::{Session, SignInIdentifier, UserProfile},
	error::ValidationError,
	flows::{Client, common},
	http::ApiHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Message surfaced when a failure carries no server message of its own.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Sign-in failed. Please try again.";

/// Input collected by a sign-in form.
#[derive(Clone)]
pub struct SignInRequest {
	/// Username, or email when it contains `@`.
	pub identifier: String,
	/// Plain-text password.
	pub password: String,
	/// Where to send the user if sign-in fails.
	pub fallback_redirect: Option<String>,
}
impl SignInRequest {
	/// Creates a request without a failure redirect.
	pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
		Self { identifier: identifier.into(), password: password.into(), fallback_redirect: None }
	}

	/// Sets the target to navigate to when sign-in fails.
	pub fn with_fallback_redirect(mut self, target: impl Into<String>) -> Self {
		self.fallback_redirect = Some(target.into());

		self
	}
}
impl Debug for SignInRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignInRequest")
			.field("identifier", &self.identifier)
			.field("password", &"<redacted>")
			.field("fallback_redirect", &self.fallback_redirect)
			.finish()
	}
}

/// Successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
	/// Profile returned by the server, now cached in the context.
	pub profile: UserProfile,
	/// Where to send the user: the recorded post-sign-in target, else the configured default.
	pub redirect: String,
}

/// Failed sign-in, ready for display.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct SignInFailure {
	/// Server-provided message when available, otherwise [`SIGN_IN_FAILED_MESSAGE`].
	pub message: String,
	/// Caller-supplied fallback target, if any.
	pub redirect: Option<String>,
	/// Underlying failure.
	#[source]
	pub error: Error,
}
impl SignInFailure {
	/// Whether the failure was caught locally before any network call.
	pub fn is_validation(&self) -> bool {
		matches!(self.error, Error::Validation(_))
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInBody<'a> {
	username: Option<&'a str>,
	email: Option<&'a str>,
	user_password: &'a str,
}

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Signs in with a username or email and a password.
	///
	/// Empty input is rejected without a network call. A success response must carry both the
	/// `access-token` and `refresh-token` headers; otherwise the attempt fails even on `200`.
	/// Only a complete success touches the session or the tiers: the access token is persisted to the
	/// volatile tier, the refresh token to the durable tier, and the profile is cached.
	pub async fn sign_in(&self, request: SignInRequest) -> Result<SignedIn, SignInFailure> {
		const KIND: FlowKind = FlowKind::SignIn;

		let span = FlowSpan::new(KIND, "sign_in");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(self.exchange_credentials(&request.identifier, &request.password))
			.await;

		obs::record_flow_result(KIND, &result);

		match result {
			Ok(profile) => {
				let redirect = self
					.context
					.take_redirect()
					.unwrap_or_else(|| self.config.default_redirect.clone());

				Ok(SignedIn { profile, redirect })
			},
			Err(error) => Err(SignInFailure {
				message: error.display_message(SIGN_IN_FAILED_MESSAGE),
				redirect: request.fallback_redirect,
				error,
			}),
		}
	}

	async fn exchange_credentials(&self, identifier: &str, password: &str) -> Result<UserProfile> {
		let identifier = SignInIdentifier::parse(identifier)?;

		if password.is_empty() {
			return Err(ValidationError::MissingPassword.into());
		}

		let body = SignInBody {
			username: identifier.username(),
			email: identifier.email(),
			user_password: password,
		};
		let url = self.config.endpoint(&self.config.paths.sign_in)?;
		let call = ApiCall::post(url).json(&body)?;
		let response = self.dispatch(&call, None).await?;
		let access_token = common::require_header_secret(&response, ACCESS_TOKEN_HEADER)?;
		let refresh_token = common::require_header_secret(&response, REFRESH_TOKEN_HEADER)?;
		let profile: UserProfile = common::decode_json(response)?;

		self.context.persist_access_token(&access_token).await?;

		if let Err(err) = self.context.persist_refresh_token(&refresh_token).await {
			if let Err(rollback) = self.context.forget_access_token().await {
				obs::record_absorbed_failure(FlowKind::SignIn, &rollback);
			}

			return Err(err);
		}

		self.context.set(Session::new(access_token, refresh_token));
		self.context.set_profile(profile.clone());

		Ok(profile)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn body_sends_exactly_one_identifier_field() {
		let email = SignInIdentifier::parse("octo@example.com").expect("Email should parse.");
		let body = SignInBody {
			username: email.username(),
			email: email.email(),
			user_password: "hunter2",
		};

		assert_eq!(
			serde_json::to_value(&body).expect("Body should serialize."),
			serde_json::json!({ "username": null, "email": "octo@example.com", "userPassword": "hunter2" })
		);
	}

	#[test]
	fn request_debug_redacts_password() {
		let request = SignInRequest::new("octo", "hunter2").with_fallback_redirect("/signin");
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("hunter2"));
		assert!(rendered.contains("/signin"));
	}
}
