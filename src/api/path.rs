//! Endpoint table of the GCS API.

// self
use crate::_prelude::*;

/// Endpoint paths, relative to the configured API base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPaths {
	/// Credential exchange returning the token pair.
	pub sign_in: String,
	/// Server-side session termination.
	pub sign_out: String,
	/// Access-token renewal from a refresh token.
	pub refresh: String,
	/// Profile lookup for the authenticated user.
	pub get_user: String,
	/// Username validity check.
	pub check_username: String,
	/// Email validity check.
	pub check_email: String,
	/// Password strength check.
	pub check_password: String,
	/// SSH key name validity check.
	pub check_ssh_key_name: String,
	/// SSH public key validity check.
	pub check_ssh_key_public_key: String,
	/// Repository name validity check.
	pub check_repository_name: String,
}
impl Default for ApiPaths {
	fn default() -> Self {
		Self {
			sign_in: "/api/gcs/auth/signin".into(),
			sign_out: "/api/gcs/auth/signout".into(),
			refresh: "/api/gcs/auth/refresh".into(),
			get_user: "/api/gcs/user/get".into(),
			check_username: "/api/gcs/user/username".into(),
			check_email: "/api/gcs/user/email".into(),
			check_password: "/api/gcs/user/user-password".into(),
			check_ssh_key_name: "/api/gcs/ssh/ssh-key-name".into(),
			check_ssh_key_public_key: "/api/gcs/ssh/ssh-key-publickey".into(),
			check_repository_name: "/api/gcs/repository/repository-name".into(),
		}
	}
}
