//! Thread-safe in-memory [`SessionStorage`] tier, lost when the process ends.

// self
use crate::{
	_prelude::*,
	store::{SessionStorage, StorageKey, StoreError, StoreFuture},
};

type StorageMap = Arc<RwLock<HashMap<StorageKey, String>>>;

/// Volatile tier keeping values in-process; the stand-in for tab-scoped storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(StorageMap);
impl MemoryStorage {
	/// Synchronous read, handy for assertions and hosts without an executor at hand.
	pub fn get(&self, key: StorageKey) -> Option<String> {
		self.0.read().get(&key).cloned()
	}

	/// Whether the tier holds no values.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn write_now(map: StorageMap, key: StorageKey, value: String) -> Result<(), StoreError> {
		map.write().insert(key, value);

		Ok(())
	}

	fn remove_now(map: StorageMap, key: StorageKey) -> Result<(), StoreError> {
		map.write().remove(&key);

		Ok(())
	}
}
impl SessionStorage for MemoryStorage {
	fn read(&self, key: StorageKey) -> StoreFuture<'_, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(&key).cloned()) })
	}

	fn write(&self, key: StorageKey, value: String) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::write_now(map, key, value) })
	}

	fn remove(&self, key: StorageKey) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::remove_now(map, key) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn write_read_remove_cycle() {
		let storage = MemoryStorage::default();

		storage
			.write(StorageKey::AccessToken, "access-1".into())
			.await
			.expect("Writing to memory storage should succeed.");

		assert_eq!(
			storage.read(StorageKey::AccessToken).await.expect("Reading should succeed."),
			Some("access-1".into())
		);
		assert_eq!(storage.get(StorageKey::RefreshToken), None);

		storage.remove(StorageKey::AccessToken).await.expect("Removal should succeed.");
		storage.remove(StorageKey::AccessToken).await.expect("Repeated removal should succeed.");

		assert!(storage.is_empty());
	}

	#[test]
	fn clones_share_state() {
		let storage = MemoryStorage::default();
		let clone = storage.clone();

		MemoryStorage::write_now(storage.0.clone(), StorageKey::RefreshToken, "r".into())
			.expect("Writing to memory storage should succeed.");

		assert_eq!(clone.get(StorageKey::RefreshToken), Some("r".into()));
	}
}
