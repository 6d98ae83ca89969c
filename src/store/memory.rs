//! Thread-safe in-memory [`VerdictStore`] shared by every gate invocation in the process.

// self
use crate::{
	_prelude::*,
	auth::CredentialToken,
	store::{CacheEntry, StoreError, StoreFuture, VerdictStore},
};

type StoreMap = Arc<RwLock<HashMap<CredentialToken, CacheEntry>>>;

/// Process-wide validation cache; clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of entries currently held, fresh or stale.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when no entry has been written yet.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Drops every entry whose window elapsed at `now`, returning how many were removed.
	///
	/// The gate never calls this; hosts that worry about unbounded growth can run it on their
	/// own schedule.
	pub fn purge_stale(&self, now: OffsetDateTime) -> usize {
		let mut guard = self.0.write();
		let before = guard.len();

		guard.retain(|_, entry| entry.is_fresh_at(now));

		before - guard.len()
	}

	fn save_now(map: StoreMap, token: CredentialToken, entry: CacheEntry) -> Result<(), StoreError> {
		map.write().insert(token, entry);

		Ok(())
	}

	fn fetch_now(map: StoreMap, token: &CredentialToken) -> Option<CacheEntry> {
		map.read().get(token).copied()
	}
}
impl VerdictStore for MemoryStore {
	fn save(&self, token: CredentialToken, entry: CacheEntry) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::save_now(map, token, entry) })
	}

	fn fetch<'a>(&'a self, token: &'a CredentialToken) -> StoreFuture<'a, Option<CacheEntry>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::fetch_now(map, token)) })
	}
}
