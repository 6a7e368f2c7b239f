//! Profile of the signed-in user.

// self
use crate::_prelude::*;

/// Profile of the authenticated user, as returned by sign-in and the get-user endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Server-assigned identifier; empty until the profile is loaded.
	#[serde(default)]
	pub id: String,
	/// Unique username.
	#[serde(default)]
	pub username: String,
	/// Registered email address.
	#[serde(default)]
	pub email: String,
	/// Avatar image URL, when the user set one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
}
impl UserProfile {
	/// Whether the profile has been populated; a non-empty id means loaded.
	pub fn is_loaded(&self) -> bool {
		!self.id.is_empty()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_camel_case_payload() {
		let profile: UserProfile = serde_json::from_str(
			"{\"id\":\"42\",\"username\":\"octo\",\"email\":\"octo@example.com\",\"avatarUrl\":\"https://cdn/a.png\"}",
		)
		.expect("Profile payload should decode.");

		assert!(profile.is_loaded());
		assert_eq!(profile.avatar_url.as_deref(), Some("https://cdn/a.png"));
	}

	#[test]
	fn empty_payload_is_not_loaded() {
		let profile: UserProfile =
			serde_json::from_str("{}").expect("Empty profile payload should decode.");

		assert!(!profile.is_loaded());
		assert_eq!(profile, UserProfile::default());
	}
}
