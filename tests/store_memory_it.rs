// std
use std::sync::Arc;
// crates.io
use time::{Duration, macros};
// self
use backoffice_gate::{
	auth::CredentialToken,
	store::{CacheEntry, MemoryStore, VerdictStore},
};

#[tokio::test]
async fn save_overwrites_and_clones_share_state() {
	let store = MemoryStore::default();
	let shared = store.clone();
	let token = CredentialToken::new("token-1");
	let now = macros::datetime!(2025-06-01 12:00 UTC);

	store
		.save(token.clone(), CacheEntry::new(false, now, Duration::minutes(5)))
		.await
		.expect("Saving into the memory store should succeed.");
	shared
		.save(
			token.clone(),
			CacheEntry::new(true, now + Duration::minutes(1), Duration::minutes(5)),
		)
		.await
		.expect("Overwriting through a clone should succeed.");

	let entry = store
		.fetch(&token)
		.await
		.expect("Fetching from the memory store should succeed.")
		.expect("Entry should be present.");

	assert_eq!(store.len(), 1);
	assert!(entry.is_expired);
	assert_eq!(entry.expires_at, macros::datetime!(2025-06-01 12:06 UTC));
	assert!(
		store
			.fetch(&CredentialToken::new("token-2"))
			.await
			.expect("Fetching an unknown token should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn stale_entries_are_kept_until_purged() {
	let store = MemoryStore::default();
	let now = macros::datetime!(2025-06-01 12:00 UTC);

	store
		.save(
			CredentialToken::new("old"),
			CacheEntry::new(false, now - Duration::hours(1), Duration::minutes(5)),
		)
		.await
		.expect("Saving a stale entry should succeed.");
	store
		.save(CredentialToken::new("new"), CacheEntry::new(false, now, Duration::minutes(5)))
		.await
		.expect("Saving a fresh entry should succeed.");

	assert_eq!(store.len(), 2);
	assert_eq!(store.purge_stale(now), 1);
	assert_eq!(store.len(), 1);
	assert!(
		store
			.fetch(&CredentialToken::new("new"))
			.await
			.expect("Fetching the surviving entry should succeed.")
			.is_some()
	);
	assert_eq!(store.purge_stale(now), 0);
}

#[tokio::test]
async fn concurrent_writers_for_one_token_leave_a_single_entry() {
	let store = Arc::new(MemoryStore::default());
	let now = macros::datetime!(2025-06-01 12:00 UTC);
	let mut handles = Vec::new();

	for i in 0..16 {
		let store = store.clone();

		handles.push(tokio::spawn(async move {
			let entry = CacheEntry::new(i % 2 == 0, now, Duration::minutes(5));

			store.save(CredentialToken::new("shared"), entry).await
		}));
	}
	for handle in handles {
		handle
			.await
			.expect("Writer task should not panic.")
			.expect("Concurrent save should succeed.");
	}

	assert_eq!(store.len(), 1);
}
