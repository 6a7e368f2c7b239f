//! Persistence tiers backing the session and the built-in tier implementations.
//!
//! A session uses two tiers with different lifetimes: a volatile tier for the access token and
//! a durable tier for the refresh token. Both speak the same [`SessionStorage`] contract so hosts
//! can plug in whatever their platform offers.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

// self
use crate::_prelude::*;

/// Boxed future returned by [`SessionStorage`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Key/value contract implemented by persistence tiers.
pub trait SessionStorage
where
	Self: Send + Sync,
{
	/// Returns the value stored under `key`, if present.
	fn read(&self, key: StorageKey) -> StoreFuture<'_, Option<String>>;

	/// Stores or replaces the value under `key`.
	fn write(&self, key: StorageKey, value: String) -> StoreFuture<'_, ()>;

	/// Removes the value under `key`; removing a missing key succeeds.
	fn remove(&self, key: StorageKey) -> StoreFuture<'_, ()>;
}

/// Keys persisted by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
	/// Access token; volatile tier only.
	AccessToken,
	/// Refresh token; durable tier only.
	RefreshToken,
}
impl StorageKey {
	/// Stable key name used by persisted layouts.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::AccessToken => "access-token",
			Self::RefreshToken => "refresh-token",
		}
	}
}
impl Display for StorageKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Error type produced by [`SessionStorage`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::Error;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "disk full".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("disk full"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn storage_keys_match_persisted_layout() {
		assert_eq!(StorageKey::AccessToken.as_str(), "access-token");
		assert_eq!(StorageKey::RefreshToken.to_string(), "refresh-token");
	}
}
