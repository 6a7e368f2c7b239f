//! Session-domain values: redacted token secrets, the session snapshot, the user profile, and
//! sign-in identifiers.

pub mod identifier;
pub mod profile;
pub mod secret;
pub mod session;

pub use identifier::*;
pub use profile::*;
pub use secret::*;
pub use session::*;
