// self
use crate::gate::Verdict;

/// Records a verdict via the global metrics recorder (when enabled).
pub fn record_verdict(verdict: &Verdict) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"backoffice_gate_decision_total",
			"verdict" => verdict.label(),
			"basis" => verdict.basis_label()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = verdict;
	}
}
