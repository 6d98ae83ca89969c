//! Outcome of a single gate check.

// self
use crate::_prelude::*;

/// Decision produced for one inbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
	/// Forward the request unchanged.
	Allow(AllowBasis),
	/// Redirect the request to the login path.
	Deny(DenyReason),
}
impl Verdict {
	/// Returns `true` for [`Verdict::Allow`].
	pub const fn is_allowed(&self) -> bool {
		matches!(self, Self::Allow(_))
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn label(&self) -> &'static str {
		match self {
			Self::Allow(_) => "allow",
			Self::Deny(_) => "redirect",
		}
	}

	/// Returns the basis/reason label suitable for span or metric fields.
	pub const fn basis_label(&self) -> &'static str {
		match self {
			Self::Allow(basis) => basis.as_str(),
			Self::Deny(reason) => reason.as_str(),
		}
	}
}
impl Display for Verdict {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}({})", self.label(), self.basis_label())
	}
}

/// Why a request was let through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllowBasis {
	/// Path lies outside the protected prefix.
	Unprotected,
	/// Path is one of the excluded literals (login, guest).
	Excluded,
	/// A fresh cache entry marked the token as live.
	Cached,
	/// The authority confirmed the token as live.
	Validated,
}
impl AllowBasis {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Unprotected => "unprotected",
			Self::Excluded => "excluded",
			Self::Cached => "cached",
			Self::Validated => "validated",
		}
	}
}

/// Why a request was redirected to login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DenyReason {
	/// No `token` cookie, or a blank one.
	MissingToken,
	/// A fresh cache entry marked the token as expired.
	CachedExpired,
	/// The authority reported the token as expired.
	Expired,
	/// The authority could not be reached or answered with a non-success status.
	AuthorityUnavailable,
	/// The authority answered with a malformed payload.
	ProtocolViolation,
}
impl DenyReason {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::MissingToken => "missing_token",
			Self::CachedExpired => "cached_expired",
			Self::Expired => "expired",
			Self::AuthorityUnavailable => "authority_unavailable",
			Self::ProtocolViolation => "protocol_violation",
		}
	}

	/// Returns `true` when the denial came from a failed authority call rather than a verdict.
	pub const fn is_failure(self) -> bool {
		matches!(self, Self::AuthorityUnavailable | Self::ProtocolViolation)
	}
}
