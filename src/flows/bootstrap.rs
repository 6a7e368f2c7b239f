//! Start-up procedure: hydrates the token store from the persistence tiers and loads the user
//! profile.

// self
use crate::{
	_prelude::*,
	api::ApiCall,
	auth::UserProfile,
	flows::Client,
	http::ApiHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// How a bootstrap ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootstrapOutcome {
	/// The profile was already cached; no call was made.
	Cached(UserProfile),
	/// The profile was fetched from the server.
	Loaded(UserProfile),
	/// No usable session exists; the session, the profile, and both tiers are empty.
	Anonymous,
}
impl BootstrapOutcome {
	/// Profile in effect after bootstrap, if any.
	pub fn profile(&self) -> Option<&UserProfile> {
		match self {
			Self::Cached(profile) | Self::Loaded(profile) => Some(profile),
			Self::Anonymous => None,
		}
	}
}

impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Hydrates the session and loads the profile; run once when the process starts.
	///
	/// Persisted tokens are copied into the token store verbatim. A cached profile short-circuits
	/// the network. Otherwise, when only a refresh token survived, the access token is refreshed
	/// eagerly and persisted to the volatile tier before the profile is fetched. Any failure to obtain the profile clears the
	/// session and both tiers and yields [`BootstrapOutcome::Anonymous`]; only persistence-tier
	/// failures are returned as errors.
	pub async fn bootstrap(&self) -> Result<BootstrapOutcome> {
		const KIND: FlowKind = FlowKind::Bootstrap;

		let span = FlowSpan::new(KIND, "bootstrap");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let session = self.context.hydrate().await?;
				let cached = self.context.profile();

				if cached.is_loaded() {
					return Ok(BootstrapOutcome::Cached(cached));
				}
				if session.is_empty() {
					self.context.clear().await?;

					return Ok(BootstrapOutcome::Anonymous);
				}
				if session.access_token.is_none() {
					self.refresh().await;

					match self.context.get().access_token {
						Some(token) => self.context.persist_access_token(&token).await?,
						None => {
							self.context.clear().await?;

							return Ok(BootstrapOutcome::Anonymous);
						},
					}
				}

				match self.fetch_profile().await {
					Ok(profile) => {
						self.context.set_profile(profile.clone());

						Ok(BootstrapOutcome::Loaded(profile))
					},
					Err(err) => {
						obs::record_absorbed_failure(KIND, &err);
						self.context.clear().await?;

						Ok(BootstrapOutcome::Anonymous)
					},
				}
			})
			.await;

		obs::record_flow_result(KIND, &result);

		result
	}

	/// Fetches the signed-in user's profile through the resilient executor.
	pub async fn fetch_profile(&self) -> Result<UserProfile> {
		let url = self.config.endpoint(&self.config.paths.get_user)?;
		let call = ApiCall::get(url).query("userType", "token");

		self.execute(&call).await
	}
}
