//! Sign-in identifiers: the same input field accepts a username or an email address.

// self
use crate::{_prelude::*, error::ValidationError};

/// Identifier typed into the sign-in form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignInIdentifier {
	/// Input contained `@` and is sent as the `email` field.
	Email(String),
	/// Any other input, sent as the `username` field.
	Username(String),
}
impl SignInIdentifier {
	/// Classifies raw input, rejecting empty values.
	pub fn parse(raw: &str) -> Result<Self, ValidationError> {
		if raw.is_empty() {
			return Err(ValidationError::MissingIdentifier);
		}

		if raw.contains('@') {
			Ok(Self::Email(raw.to_owned()))
		} else {
			Ok(Self::Username(raw.to_owned()))
		}
	}

	/// Value for the `username` field, if this is a username.
	pub fn username(&self) -> Option<&str> {
		match self {
			Self::Username(value) => Some(value),
			Self::Email(_) => None,
		}
	}

	/// Value for the `email` field, if this is an email address.
	pub fn email(&self) -> Option<&str> {
		match self {
			Self::Email(value) => Some(value),
			Self::Username(_) => None,
		}
	}
}
impl FromStr for SignInIdentifier {
	type Err = ValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn at_sign_selects_email() {
		let id = SignInIdentifier::parse("octo@example.com").expect("Email should parse.");

		assert_eq!(id.email(), Some("octo@example.com"));
		assert_eq!(id.username(), None);

		let id: SignInIdentifier = "octo".parse().expect("Username should parse.");

		assert_eq!(id.username(), Some("octo"));
		assert_eq!(id.email(), None);
	}

	#[test]
	fn empty_input_is_rejected() {
		assert_eq!(SignInIdentifier::parse(""), Err(ValidationError::MissingIdentifier));
	}
}
