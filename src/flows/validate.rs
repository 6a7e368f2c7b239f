//! Form-field validity checks.
//!
//! Remote checks ask the API whether a value is acceptable: a success status means valid, an
//! error body means invalid and carries the message to show. They are anonymous, single-shot
//! calls; no token is attached and nothing is retried. Local checks never touch the network.

// self
use crate::{
	_prelude::*,
	api::{ApiCall, ApiErrorCode},
	error::ValidationError,
	flows::Client,
	http::ApiHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Message used when a rejection carries no server message.
pub const FIELD_REJECTED_MESSAGE: &str = "Value is not valid.";
/// Message used when a registered email was expected but the address is free.
pub const EMAIL_NOT_REGISTERED_MESSAGE: &str = "Email is not registered.";
/// Message used when the confirmation does not match the password.
pub const PASSWORDS_DIFFER_MESSAGE: &str = "The two passwords do not match.";

/// Result of checking one form field.
pub type FieldCheck = Result<(), FieldRejection>;

/// Why a field did not validate.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum FieldRejection {
	/// The value is invalid; `message` is ready for display.
	#[error("{message}")]
	Invalid {
		/// Message to show next to the field.
		message: String,
	},
	/// The field depends on another field that is still empty; nothing to show yet.
	#[error("Field depends on another field that is still empty.")]
	Incomplete,
}
impl FieldRejection {
	fn invalid(message: impl Into<String>) -> Self {
		Self::Invalid { message: message.into() }
	}
}

/// What the email check should treat as success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmailExpectation {
	/// Sign-up: the address must be well formed and not yet registered.
	#[default]
	Available,
	/// Password reset: the address must already belong to an account.
	Registered,
}

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Checks that a username is well formed and free.
	pub async fn check_username(&self, value: &str) -> FieldCheck {
		let path = &self.config.paths.check_username;

		self.probe(path, "username", value).await.map_err(reject)
	}

	/// Checks an email address against `expectation`.
	///
	/// With [`EmailExpectation::Registered`] the server verdict is inverted: an
	/// [`EmailAlreadyExists`](ApiErrorCode::EmailAlreadyExists) rejection is success and an
	/// accepted address is rejected with [`EMAIL_NOT_REGISTERED_MESSAGE`].
	pub async fn check_email(&self, value: &str, expectation: EmailExpectation) -> FieldCheck {
		let result = self.probe(&self.config.paths.check_email, "email", value).await;

		match (expectation, result) {
			(EmailExpectation::Available, result) => result.map_err(reject),
			(EmailExpectation::Registered, Ok(())) =>
				Err(FieldRejection::invalid(EMAIL_NOT_REGISTERED_MESSAGE)),
			(EmailExpectation::Registered, Err(err))
				if err.api_code() == Some(ApiErrorCode::EmailAlreadyExists) =>
				Ok(()),
			(EmailExpectation::Registered, Err(err)) => Err(reject(err)),
		}
	}

	/// Checks that a password meets the server's strength rules.
	pub async fn check_password(&self, value: &str) -> FieldCheck {
		let path = &self.config.paths.check_password;

		self.probe(path, "userPassword", value).await.map_err(reject)
	}

	/// Checks that an SSH key name is well formed and unused.
	pub async fn check_ssh_key_name(&self, value: &str) -> FieldCheck {
		let path = &self.config.paths.check_ssh_key_name;

		self.probe(path, "name", value).await.map_err(reject)
	}

	/// Checks that an SSH public key parses and is not registered yet.
	pub async fn check_ssh_key_public_key(&self, value: &str) -> FieldCheck {
		let path = &self.config.paths.check_ssh_key_public_key;

		self.probe(path, "publicKey", value).await.map_err(reject)
	}

	/// Checks that a repository name is well formed and unused.
	pub async fn check_repository_name(&self, value: &str) -> FieldCheck {
		let path = &self.config.paths.check_repository_name;

		self.probe(path, "repositoryName", value).await.map_err(reject)
	}

	async fn probe(&self, path: &str, param: &str, value: &str) -> Result<()> {
		const KIND: FlowKind = FlowKind::Validate;

		let span = FlowSpan::new(KIND, "probe");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let url = self.config.endpoint(path)?;
				let call = ApiCall::get(url).query(param, value);

				self.dispatch(&call, None).await.map(drop)
			})
			.await;

		obs::record_flow_result(KIND, &result);

		result
	}
}

/// Checks that the confirmation matches the password.
///
/// While the password itself is empty there is nothing to compare against, so the check reports
/// [`FieldRejection::Incomplete`] instead of a message.
pub fn confirm_password(confirmation: &str, password: &str) -> FieldCheck {
	if password.is_empty() {
		Err(FieldRejection::Incomplete)
	} else if confirmation != password {
		Err(FieldRejection::invalid(PASSWORDS_DIFFER_MESSAGE))
	} else {
		Ok(())
	}
}

/// Checks that an email verification code is six ASCII digits.
pub fn check_verification_code(code: &str) -> FieldCheck {
	const CODE_LEN: usize = 6;

	if code.len() == CODE_LEN && code.bytes().all(|byte| byte.is_ascii_digit()) {
		Ok(())
	} else {
		Err(FieldRejection::invalid(ValidationError::MalformedVerificationCode.to_string()))
	}
}

fn reject(err: Error) -> FieldRejection {
	FieldRejection::invalid(err.display_message(FIELD_REJECTED_MESSAGE))
}
