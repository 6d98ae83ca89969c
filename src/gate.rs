//! Access Gate: decides whether a request may reach the protected backoffice.
//!
//! Each check runs independently; the only shared state is the [`VerdictStore`]. A token is
//! sent to the remote [`TokenAuthority`] at most once per cache window, and every failure to
//! obtain a well-formed verdict redirects to login. Concurrent misses for the same token are
//! not deduplicated: each calls the authority and the last write wins, which is harmless
//! because introspection has no side effects.

pub mod policy;
pub mod verdict;

pub use policy::*;
pub use verdict::*;

// self
use crate::{
	_prelude::*,
	auth::CredentialToken,
	http::TokenAuthority,
	obs::{self, CheckSpan},
	store::{CacheEntry, VerdictStore},
};
#[cfg(feature = "reqwest")]
use crate::{config::GateConfig, http::ReqwestTokenAuthority};

#[cfg(feature = "reqwest")]
/// Gate specialized for the crate's default reqwest authority.
pub type ReqwestAccessGate = AccessGate<ReqwestTokenAuthority>;

/// Request filter guarding the backoffice prefix.
pub struct AccessGate<A>
where
	A: ?Sized + TokenAuthority,
{
	/// Remote authority consulted on cache misses.
	pub authority: Arc<A>,
	/// Validation cache shared by every invocation.
	pub store: Arc<dyn VerdictStore>,
	/// Route policy and cache window.
	pub policy: GatePolicy,
}
impl<A> AccessGate<A>
where
	A: ?Sized + TokenAuthority,
{
	/// Creates a gate with the default [`GatePolicy`].
	pub fn new(authority: Arc<A>, store: Arc<dyn VerdictStore>) -> Self {
		Self { authority, store, policy: GatePolicy::default() }
	}

	/// Replaces the route policy.
	pub fn with_policy(mut self, policy: GatePolicy) -> Self {
		self.policy = policy;

		self
	}

	/// Decides the request using the current UTC clock.
	pub async fn check(&self, path: &str, token_cookie: Option<&str>) -> Verdict {
		self.check_at(path, token_cookie, OffsetDateTime::now_utc()).await
	}

	/// Decides the request as if it arrived at `now`.
	///
	/// Freshly validated verdicts are cached until `now + cache_ttl`.
	pub async fn check_at(
		&self,
		path: &str,
		token_cookie: Option<&str>,
		now: OffsetDateTime,
	) -> Verdict {
		let span = CheckSpan::new(path);
		let verdict = span.instrument(self.evaluate(path, token_cookie, now)).await;

		obs::record_verdict(&verdict);

		verdict
	}

	async fn evaluate(&self, path: &str, token_cookie: Option<&str>, now: OffsetDateTime) -> Verdict {
		if !self.policy.is_protected(path) {
			return Verdict::Allow(AllowBasis::Unprotected);
		}
		if self.policy.is_excluded(path) {
			return Verdict::Allow(AllowBasis::Excluded);
		}

		let Some(token) = CredentialToken::from_cookie(token_cookie) else {
			let verdict = Verdict::Deny(DenyReason::MissingToken);

			obs::log_verdict(&verdict, None);

			return verdict;
		};
		let fingerprint = token.fingerprint();
		let verdict = self.resolve(&token, &fingerprint, now).await;

		obs::log_verdict(&verdict, Some(&fingerprint));

		verdict
	}

	async fn resolve(
		&self,
		token: &CredentialToken,
		fingerprint: &str,
		now: OffsetDateTime,
	) -> Verdict {
		match self.store.fetch(token).await {
			Ok(Some(entry)) if entry.is_fresh_at(now) =>
				return if entry.is_expired {
					Verdict::Deny(DenyReason::CachedExpired)
				} else {
					Verdict::Allow(AllowBasis::Cached)
				},
			Ok(_) => (),
			// A broken cache only costs an extra authority call.
			Err(e) => obs::log_store_failure(&e, "fetch"),
		}

		let is_expired = match self.authority.is_expired(token).await {
			Ok(is_expired) => is_expired,
			Err(e) => {
				obs::log_authority_failure(&e, fingerprint);

				return Verdict::Deny(if e.is_protocol_violation() {
					DenyReason::ProtocolViolation
				} else {
					DenyReason::AuthorityUnavailable
				});
			},
		};
		let entry = CacheEntry::new(is_expired, now, self.policy.cache_ttl());

		if let Err(e) = self.store.save(token.clone(), entry).await {
			obs::log_store_failure(&e, "save");
		}

		if is_expired {
			Verdict::Deny(DenyReason::Expired)
		} else {
			Verdict::Allow(AllowBasis::Validated)
		}
	}
}
#[cfg(feature = "reqwest")]
impl AccessGate<ReqwestTokenAuthority> {
	/// Creates a gate backed by a reqwest authority built from `config`.
	pub fn from_config(config: &GateConfig, store: Arc<dyn VerdictStore>) -> Result<Self> {
		Ok(Self::new(Arc::new(ReqwestTokenAuthority::from_config(config)?), store))
	}
}
impl<A> Clone for AccessGate<A>
where
	A: ?Sized + TokenAuthority,
{
	fn clone(&self) -> Self {
		Self {
			authority: self.authority.clone(),
			store: self.store.clone(),
			policy: self.policy.clone(),
		}
	}
}
impl<A> Debug for AccessGate<A>
where
	A: ?Sized + TokenAuthority,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessGate").field("policy", &self.policy).finish()
	}
}
