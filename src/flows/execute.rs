//! Resilient request executor: attaches the session's access token, refreshes once on auth
//! failure, and retries exactly once.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::ApiCall,
	flows::{Client, common},
	http::{ApiHttpClient, ApiResponse},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Executes `call` and decodes its JSON body into `T`.
	///
	/// See [`execute_raw`](Self::execute_raw) for the refresh and retry policy.
	pub async fn execute<T>(&self, call: &ApiCall) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let response = self.execute_raw(call).await?;

		common::decode_json(response)
	}

	/// Executes `call`, returning the successful response as-is.
	///
	/// The current access token, if any, is attached under the `access-token` header of a copy
	/// of the caller's headers. When the call fails with `401`, or with `400` and code
	/// [`TokenNotFound`](crate::api::ApiErrorCode::TokenNotFound), the session is refreshed:
	///
	/// - with a new access token, the token is persisted to the volatile tier and the call is
	///   retried exactly once; the retry's result is returned as-is.
	/// - without one, the session, the profile, and both persisted tokens are cleared and the
	///   original error is returned.
	///
	/// Every other failure, including transport errors, is returned immediately.
	pub async fn execute_raw(&self, call: &ApiCall) -> Result<ApiResponse> {
		const KIND: FlowKind = FlowKind::Request;

		let span = FlowSpan::new(KIND, "execute");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let observed_epoch = self.context.refresh_gate().epoch();
				let session = self.context.get();
				let err = match self.dispatch(call, session.access_token.as_ref()).await {
					Ok(response) => return Ok(response),
					Err(err) if err.is_auth_failure() => err,
					Err(err) => return Err(err),
				};

				self.refresh_after(observed_epoch).await;

				match self.context.get().access_token {
					Some(token) => {
						self.context.persist_access_token(&token).await?;

						self.dispatch(call, Some(&token)).await
					},
					None => {
						if let Err(purge) = self.context.clear().await {
							obs::record_absorbed_failure(KIND, &purge);
						}

						Err(err)
					},
				}
			})
			.await;

		obs::record_flow_result(KIND, &result);

		result
	}
}
