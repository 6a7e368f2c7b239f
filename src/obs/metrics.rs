// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"gcs_session_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the outcome of a finished procedure.
pub fn record_flow_result<T, E>(kind: FlowKind, result: &Result<T, E>) {
	match result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(_) => record_flow_outcome(kind, FlowOutcome::Failure),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_flow_outcome_noop_without_metrics() {
		record_flow_outcome(FlowKind::SignIn, FlowOutcome::Failure);
		record_flow_result::<(), ()>(FlowKind::Refresh, &Ok(()));
	}
}
