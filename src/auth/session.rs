//! The dual-token session snapshot.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access/refresh token pair held by the token store.
///
/// The access token lives in the volatile persistence tier only; the refresh token lives in the
/// durable tier and is only ever sent to the refresh endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	/// Short-lived credential attached to authenticated calls.
	pub access_token: Option<TokenSecret>,
	/// Longer-lived credential exchanged for new access tokens.
	pub refresh_token: Option<TokenSecret>,
}
impl Session {
	/// Creates a session holding both tokens.
	pub fn new(access_token: TokenSecret, refresh_token: TokenSecret) -> Self {
		Self { access_token: Some(access_token), refresh_token: Some(refresh_token) }
	}

	/// Whether neither token is present.
	pub fn is_empty(&self) -> bool {
		self.access_token.is_none() && self.refresh_token.is_none()
	}

	/// Whether the session can authenticate a call or obtain a token that can.
	pub fn is_authenticated(&self) -> bool {
		!self.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_session_is_empty() {
		let session = Session::default();

		assert!(session.is_empty());
		assert!(!session.is_authenticated());
	}

	#[test]
	fn refresh_only_session_still_counts_as_authenticated() {
		let session =
			Session { access_token: None, refresh_token: Some(TokenSecret::new("refresh")) };

		assert!(!session.is_empty());
		assert!(session.is_authenticated());
		assert!(format!("{session:?}").contains("<redacted>"));
	}
}
