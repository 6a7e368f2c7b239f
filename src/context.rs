//! Per-session runtime context: the token store, the user-profile cache, and the two
//! persistence tiers they reconcile with.
//!
//! One [`SessionContext`] exists per signed-in session and is shared (behind `Arc`) by every
//! request that originates from it. In-memory mutations are explicit: `set` and
//! `set_access_token` never touch persistence, while the `persist_*` helpers and
//! [`clear`](SessionContext::clear) are called at the points that learn of new or invalid tokens.
//! The context also owns the refresh gate, so clients built over the same context never refresh
//! concurrently.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	auth::{Session, TokenSecret, UserProfile},
	store::{MemoryStorage, SessionStorage, StorageKey},
};

/// Session state shared by the request layer and the procedures built on it.
pub struct SessionContext {
	session: RwLock<Session>,
	profile: RwLock<UserProfile>,
	redirect_after_login: Mutex<Option<String>>,
	volatile: Arc<dyn SessionStorage>,
	durable: Arc<dyn SessionStorage>,
	refresh_gate: RefreshGate,
}
impl SessionContext {
	/// Creates an empty context over the provided volatile and durable tiers.
	pub fn new(volatile: Arc<dyn SessionStorage>, durable: Arc<dyn SessionStorage>) -> Self {
		Self {
			session: Default::default(),
			profile: Default::default(),
			redirect_after_login: Default::default(),
			volatile,
			durable,
			refresh_gate: Default::default(),
		}
	}

	/// Creates an empty context whose tiers both live in memory.
	pub fn ephemeral() -> Self {
		Self::new(Arc::new(MemoryStorage::default()), Arc::new(MemoryStorage::default()))
	}

	/// Current session snapshot.
	pub fn get(&self) -> Session {
		self.session.read().clone()
	}

	/// Replaces the in-memory session without touching persistence.
	pub fn set(&self, session: Session) {
		*self.session.write() = session;
	}

	/// Replaces only the in-memory access token.
	pub fn set_access_token(&self, token: Option<TokenSecret>) {
		self.session.write().access_token = token;
	}

	/// Resets the session and the profile, then removes both persisted tokens.
	///
	/// Memory is always reset; the first persistence failure is returned after both tiers were
	/// attempted.
	pub async fn clear(&self) -> Result<()> {
		self.set(Session::default());
		self.clear_profile();

		self.purge_persisted().await
	}

	/// Removes both persisted tokens without touching memory.
	pub async fn purge_persisted(&self) -> Result<()> {
		let volatile = self.volatile.remove(StorageKey::AccessToken).await;
		let durable = self.durable.remove(StorageKey::RefreshToken).await;

		volatile?;
		durable?;

		Ok(())
	}

	/// Loads the session from the persistence tiers as-is and returns the new snapshot.
	pub async fn hydrate(&self) -> Result<Session> {
		let access_token = self.volatile.read(StorageKey::AccessToken).await?;
		let refresh_token = self.durable.read(StorageKey::RefreshToken).await?;
		let session = Session {
			access_token: access_token.map(TokenSecret::new),
			refresh_token: refresh_token.map(TokenSecret::new),
		};

		self.set(session.clone());

		Ok(session)
	}

	/// Writes the access token to the volatile tier.
	pub async fn persist_access_token(&self, token: &TokenSecret) -> Result<()> {
		self.volatile.write(StorageKey::AccessToken, token.expose().to_owned()).await?;

		Ok(())
	}

	/// Removes the access token from the volatile tier without touching memory.
	pub async fn forget_access_token(&self) -> Result<()> {
		self.volatile.remove(StorageKey::AccessToken).await?;

		Ok(())
	}

	/// Writes the refresh token to the durable tier.
	pub async fn persist_refresh_token(&self, token: &TokenSecret) -> Result<()> {
		self.durable.write(StorageKey::RefreshToken, token.expose().to_owned()).await?;

		Ok(())
	}

	/// Cached profile snapshot; empty until loaded.
	pub fn profile(&self) -> UserProfile {
		self.profile.read().clone()
	}

	/// Replaces the cached profile.
	pub fn set_profile(&self, profile: UserProfile) {
		*self.profile.write() = profile;
	}

	/// Empties the cached profile.
	pub fn clear_profile(&self) {
		self.set_profile(UserProfile::default());
	}

	/// Records where to send the user after the next successful sign-in.
	pub fn remember_redirect(&self, target: impl Into<String>) {
		*self.redirect_after_login.lock() = Some(target.into());
	}

	/// Consumes the recorded post-sign-in target.
	pub fn take_redirect(&self) -> Option<String> {
		self.redirect_after_login.lock().take()
	}

	/// Gate every client sharing this context refreshes through.
	pub(crate) fn refresh_gate(&self) -> &RefreshGate {
		&self.refresh_gate
	}
}
impl Debug for SessionContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SessionContext")
			.field("session", &*self.session.read())
			.field("profile_loaded", &self.profile.read().is_loaded())
			.finish()
	}
}

/// Serializes refreshes and lets late arrivals reuse a refresh that finished while they waited.
///
/// The epoch advances every time a refresh completes, whatever its outcome. A caller that
/// observed epoch `n` before its request and still sees `n` once it holds the guard is the one
/// that must refresh; any other value means the session already moved on.
#[derive(Debug, Default)]
pub(crate) struct RefreshGate {
	guard: AsyncMutex<()>,
	epoch: AtomicU64,
}
impl RefreshGate {
	pub(crate) fn epoch(&self) -> u64 {
		self.epoch.load(Ordering::Acquire)
	}

	pub(crate) fn advance(&self) {
		self.epoch.fetch_add(1, Ordering::AcqRel);
	}

	pub(crate) async fn lock(&self) -> async_lock::MutexGuard<'_, ()> {
		self.guard.lock().await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn tiers() -> (Arc<MemoryStorage>, Arc<MemoryStorage>, SessionContext) {
		let volatile = Arc::new(MemoryStorage::default());
		let durable = Arc::new(MemoryStorage::default());
		let context = SessionContext::new(volatile.clone(), durable.clone());

		(volatile, durable, context)
	}

	#[tokio::test]
	async fn hydrate_reads_each_tier_verbatim() {
		let (volatile, durable, context) = tiers();

		volatile
			.write(StorageKey::AccessToken, " access A ".into())
			.await
			.expect("Seeding the volatile tier should succeed.");
		durable
			.write(StorageKey::RefreshToken, "refresh-R".into())
			.await
			.expect("Seeding the durable tier should succeed.");

		let session = context.hydrate().await.expect("Hydration should succeed.");

		assert_eq!(session, context.get());
		assert_eq!(session.access_token.as_ref().map(TokenSecret::expose), Some(" access A "));
		assert_eq!(session.refresh_token.as_ref().map(TokenSecret::expose), Some("refresh-R"));
	}

	#[tokio::test]
	async fn tokens_land_in_their_own_tier() {
		let (volatile, durable, context) = tiers();

		context
			.persist_access_token(&TokenSecret::new("a"))
			.await
			.expect("Persisting the access token should succeed.");
		context
			.persist_refresh_token(&TokenSecret::new("r"))
			.await
			.expect("Persisting the refresh token should succeed.");

		assert_eq!(volatile.get(StorageKey::AccessToken), Some("a".into()));
		assert_eq!(volatile.get(StorageKey::RefreshToken), None);
		assert_eq!(durable.get(StorageKey::RefreshToken), Some("r".into()));
		assert_eq!(durable.get(StorageKey::AccessToken), None);
	}

	#[tokio::test]
	async fn clear_resets_memory_profile_and_both_tiers() {
		let (volatile, durable, context) = tiers();

		context.set(Session::new(TokenSecret::new("a"), TokenSecret::new("r")));
		context.set_profile(UserProfile { id: "1".into(), ..Default::default() });
		context
			.persist_access_token(&TokenSecret::new("a"))
			.await
			.expect("Persisting the access token should succeed.");
		context
			.persist_refresh_token(&TokenSecret::new("r"))
			.await
			.expect("Persisting the refresh token should succeed.");
		context.clear().await.expect("Clearing should succeed.");

		assert!(context.get().is_empty());
		assert!(!context.profile().is_loaded());
		assert!(volatile.is_empty());
		assert!(durable.is_empty());
	}

	#[test]
	fn set_does_not_persist() {
		let (volatile, durable, context) = tiers();

		context.set(Session::new(TokenSecret::new("a"), TokenSecret::new("r")));

		assert!(volatile.is_empty());
		assert!(durable.is_empty());
	}

	#[tokio::test]
	async fn gate_epoch_advances() {
		let gate = RefreshGate::default();
		let before = gate.epoch();

		{
			let _guard = gate.lock().await;

			gate.advance();
		}

		assert_eq!(gate.epoch(), before + 1);
	}

	#[tokio::test]
	async fn forgetting_access_token_keeps_refresh_token() {
		let (volatile, durable, context) = tiers();

		context
			.persist_access_token(&TokenSecret::new("a"))
			.await
			.expect("Persisting the access token should succeed.");
		context
			.persist_refresh_token(&TokenSecret::new("r"))
			.await
			.expect("Persisting the refresh token should succeed.");
		context.forget_access_token().await.expect("Forgetting should succeed.");

		assert_eq!(volatile.get(StorageKey::AccessToken), None);
		assert_eq!(durable.get(StorageKey::RefreshToken), Some("r".into()));
	}

	#[test]
	fn redirect_is_consumed_once() {
		let context = SessionContext::ephemeral();

		context.remember_redirect("/repos/new");

		assert_eq!(context.take_redirect().as_deref(), Some("/repos/new"));
		assert_eq!(context.take_redirect(), None);
	}
}
