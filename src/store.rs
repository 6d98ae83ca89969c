//! Validation cache contracts and the built-in in-memory implementation.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{_prelude::*, auth::CredentialToken};

/// Boxed future returned by [`VerdictStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for cached token-validity decisions.
///
/// Implementations never evict on their own behalf; an entry is replaced only when the same
/// token is saved again.
pub trait VerdictStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the entry for `token`.
	fn save(&self, token: CredentialToken, entry: CacheEntry) -> StoreFuture<'_, ()>;

	/// Fetches the entry for `token`, fresh or stale, if present.
	fn fetch<'a>(&'a self, token: &'a CredentialToken) -> StoreFuture<'a, Option<CacheEntry>>;
}

/// Cached authority verdict for a single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
	/// Whether the authority reported the token as expired.
	pub is_expired: bool,
	/// Instant after which the entry must be re-validated.
	pub expires_at: OffsetDateTime,
}
impl CacheEntry {
	/// Creates an entry for a verdict observed at `now` that stays honored for `ttl`.
	pub fn new(is_expired: bool, now: OffsetDateTime, ttl: Duration) -> Self {
		Self { is_expired, expires_at: now + ttl }
	}

	/// Returns `true` while the entry may be honored (`now < expires_at`).
	pub fn is_fresh_at(&self, now: OffsetDateTime) -> bool {
		now < self.expires_at
	}
}

/// Error type produced by [`VerdictStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
