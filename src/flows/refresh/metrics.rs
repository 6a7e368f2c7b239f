// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for access-token refreshes.
#[derive(Debug, Default)]
pub struct RefreshMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failure: AtomicU64,
	coalesced: AtomicU64,
}
impl RefreshMetrics {
	/// Returns the number of refreshes actually performed.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of refreshes that produced a new access token.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of refreshes that left the session without an access token.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	/// Returns the number of callers that reused a refresh finished by someone else.
	pub fn coalesced(&self) -> u64 {
		self.coalesced.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_coalesced(&self) {
		self.coalesced.fetch_add(1, Ordering::Relaxed);
	}
}
