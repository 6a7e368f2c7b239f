//! Registry of error codes carried in `{code, message}` error bodies.

// self
use crate::_prelude::*;

macro_rules! def_codes {
	($($variant:ident = $code:literal => $doc:literal,)+) => {
		/// Error codes the API reports inside [`ErrorBody`].
		#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
		pub enum ApiErrorCode {
			$(
				#[doc = $doc]
				$variant,
			)+
		}
		impl ApiErrorCode {
			/// Numeric code as it appears on the wire.
			pub const fn code(self) -> i32 {
				match self {
					$(Self::$variant => $code,)+
				}
			}

			/// Resolves a wire code, returning `None` for codes outside the registry.
			pub const fn from_code(code: i32) -> Option<Self> {
				match code {
					$($code => Some(Self::$variant),)+
					_ => None,
				}
			}
		}
	};
}

def_codes! {
	ValidationError = 1 => "Request parameters failed server-side validation.",
	UsernameReserved = 2 => "Username is reserved.",
	UsernameAlreadyExists = 3 => "Username is already taken.",
	EmailAlreadyExists = 4 => "Email is already registered.",
	WrongSignInInformation = 5 => "Credentials do not match.",
	InvalidToken = 6 => "Token is malformed or expired.",
	AccessDenied = 7 => "Caller may not access the resource.",
	TokenNotFound = 8 => "No token accompanied the request.",
	MessageConversionError = 9 => "Request body could not be read.",
	UserNotFound = 10 => "User does not exist.",
	UserCreateFailed = 11 => "User could not be created.",
	UserUpdateFailed = 12 => "User could not be updated.",
	UserDeleteFailed = 13 => "User could not be deleted.",
	WrongUpdatePasswordInformation = 14 => "Password change credentials do not match.",
	RepositoryNotFound = 15 => "Repository does not exist.",
	RepositoryAlreadyExists = 16 => "Repository name is already used.",
	RepositoryCreateFailed = 17 => "Repository could not be created.",
	RepositoryUpdateFailed = 18 => "Repository could not be updated.",
	RepositoryDeleteFailed = 19 => "Repository could not be deleted.",
	RepositoryRefNotFound = 20 => "Branch or tag does not exist.",
	RepositoryPathNotFound = 21 => "Path does not exist in the repository.",
	CollaborationAddFailed = 22 => "Collaborator could not be added.",
	CollaborationRemoveFailed = 23 => "Collaborator could not be removed.",
	CollaborationAlreadyExists = 24 => "Collaborator was already added.",
	CollaborationNotFound = 25 => "Collaboration does not exist.",
	SshKeyUploadFailed = 26 => "SSH key could not be uploaded.",
	SshKeyUpdateFailed = 27 => "SSH key could not be updated.",
	SshKeyDeleteFailed = 28 => "SSH key could not be deleted.",
	SshKeyNotFound = 29 => "SSH key does not exist.",
	SshKeyPublicKeyInvalid = 30 => "SSH public key is malformed.",
	SshKeyPublicKeyAlreadyExists = 31 => "SSH public key is already registered.",
	SshKeyNameAlreadyExists = 32 => "SSH key name is already used.",
	OperationNotImplemented = 33 => "Operation is not implemented by the server.",
	ServerError = 34 => "Unexpected server failure.",
	IllogicalOperation = 35 => "Operation makes no sense in the current state.",
	InvalidEmailVerificationCode = 36 => "Email verification code is wrong or expired.",
}

/// Error payload returned by the API alongside non-success statuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
	/// Numeric error code; see [`ApiErrorCode`].
	pub code: i32,
	/// Human-readable message intended for end users.
	#[serde(default)]
	pub message: String,
}
impl ErrorBody {
	/// Registry entry for [`code`](Self::code), if known.
	pub fn known_code(&self) -> Option<ApiErrorCode> {
		ApiErrorCode::from_code(self.code)
	}
}
