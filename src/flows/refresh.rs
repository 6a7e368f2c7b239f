//! Access-token renewal behind a single-flight gate.
//!
//! [`Client::refresh`] exchanges the stored refresh token for a new access token. The refresh
//! token travels only in the `refresh-token` header of the refresh call and is never rotated;
//! only the access token is renewed. Failures are absorbed: the procedure's sole output is the
//! session's access token, which is left empty whenever no new token was obtained. Concurrent
//! callers that hit an auth failure while a refresh is in flight wait for it and reuse its
//! outcome rather than starting their own.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	api::{ACCESS_TOKEN_HEADER, ApiCall, REFRESH_TOKEN_HEADER},
	auth::TokenSecret,
	flows::{Client, common},
	http::ApiHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Renews the access token from the stored refresh token.
	///
	/// Without a refresh token no call is made and the access token is cleared. Read the
	/// session afterwards to learn the outcome.
	pub async fn refresh(&self) {
		let _singleflight = self.context.refresh_gate().lock().await;

		self.refresh_locked().await;
	}

	/// Refreshes unless another refresh completed since `observed_epoch` was read.
	pub(crate) async fn refresh_after(&self, observed_epoch: u64) {
		let _singleflight = self.context.refresh_gate().lock().await;

		if self.context.refresh_gate().epoch() != observed_epoch {
			self.refresh_metrics.record_coalesced();

			return;
		}

		self.refresh_locked().await;
	}

	async fn refresh_locked(&self) {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::new(KIND, "refresh");

		span.instrument(async {
			self.context.set_access_token(None);

			if let Some(refresh_token) = self.context.get().refresh_token {
				obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
				self.refresh_metrics.record_attempt();

				let result = self.request_access_token(&refresh_token).await;

				obs::record_flow_result(KIND, &result);

				match result {
					Ok(token) => {
						self.refresh_metrics.record_success();
						self.context.set_access_token(Some(token));
					},
					Err(err) => {
						self.refresh_metrics.record_failure();
						obs::record_absorbed_failure(KIND, &err);
					},
				}
			}

			self.context.refresh_gate().advance();
		})
		.await
	}

	async fn request_access_token(&self, refresh_token: &TokenSecret) -> Result<TokenSecret> {
		let url = self.config.endpoint(&self.config.paths.refresh)?;
		let call = ApiCall::get(url).header(REFRESH_TOKEN_HEADER, refresh_token.expose())?;
		let response = self.dispatch(&call, None).await?;

		common::require_header_secret(&response, ACCESS_TOKEN_HEADER)
	}
}
