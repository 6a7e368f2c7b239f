//! Optional observability helpers for session procedures.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `gcs_session.flow` with the `flow`
//!   (procedure) and `stage` (call site) fields, plus `warn` events for failures a procedure
//!   absorbs instead of returning.
//! - Enable `metrics` to increment the `gcs_session_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Session procedures observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authenticated call through the resilient request executor.
	Request,
	/// Access-token renewal.
	Refresh,
	/// Credential exchange.
	SignIn,
	/// Session termination.
	SignOut,
	/// Start-up hydration and profile load.
	Bootstrap,
	/// Remote form-field validity check.
	Validate,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Request => "request",
			FlowKind::Refresh => "refresh",
			FlowKind::SignIn => "sign_in",
			FlowKind::SignOut => "sign_out",
			FlowKind::Bootstrap => "bootstrap",
			FlowKind::Validate => "validate",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a procedure.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure, whether propagated or absorbed.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
