//! Session termination.

// self
use crate::{
	_prelude::*,
	api::ApiCall,
	flows::Client,
	http::ApiHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Ends the session.
	///
	/// The server is told on a best-effort basis (one attempt with the current access token, no
	/// refresh); without an access token the call is skipped. Local state is cleared whatever the
	/// server answers. Only persistence-tier failures are
	/// returned.
	pub async fn sign_out(&self) -> Result<()> {
		const KIND: FlowKind = FlowKind::SignOut;

		let span = FlowSpan::new(KIND, "sign_out");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let session = self.context.get();

				if let Some(access_token) = session.access_token.as_ref() {
					let notified = match self.config.endpoint(&self.config.paths.sign_out) {
						Ok(url) => self.dispatch(&ApiCall::post(url), Some(access_token)).await.map(drop),
						Err(err) => Err(err.into()),
					};

					if let Err(err) = notified {
						obs::record_absorbed_failure(KIND, &err);
					}
				}

				self.context.clear().await
			})
			.await;

		obs::record_flow_result(KIND, &result);

		result
	}
}
