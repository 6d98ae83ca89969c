// self
use crate::{_prelude::*, gate::Verdict, store::StoreError};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCheck<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCheck<F> = F;

/// Span wrapped around a single gate check.
#[derive(Clone, Debug)]
pub struct CheckSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CheckSpan {
	/// Creates a new span tagged with the request path.
	pub fn new(path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("backoffice_gate.check", path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = path;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCheck<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs the final verdict of a check.
pub fn log_verdict(verdict: &Verdict, fingerprint: Option<&str>) {
	#[cfg(feature = "tracing")]
	{
		match verdict {
			Verdict::Allow(_) => tracing::trace!(
				verdict = verdict.label(),
				basis = verdict.basis_label(),
				token = fingerprint,
				"request allowed"
			),
			Verdict::Deny(_) => tracing::debug!(
				verdict = verdict.label(),
				basis = verdict.basis_label(),
				token = fingerprint,
				"request redirected to login"
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (verdict, fingerprint);
	}
}

/// Logs an authority call that could not produce a verdict.
///
/// Malformed payloads are logged at `error` since they point at a broken authority; network
/// and status failures at `warn`.
pub fn log_authority_failure(err: &Error, fingerprint: &str) {
	#[cfg(feature = "tracing")]
	{
		if err.is_protocol_violation() {
			tracing::error!(
				token = fingerprint,
				error = %err,
				"token authority violated the response contract"
			);
		} else {
			tracing::warn!(token = fingerprint, error = %err, "token authority unavailable");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (err, fingerprint);
	}
}

/// Logs a validation cache failure; `op` names the store call.
pub fn log_store_failure(err: &StoreError, op: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(op, error = %err, "validation cache failure");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (err, op);
	}
}
