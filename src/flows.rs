//! The request layer and the session procedures built on it.

pub mod bootstrap;
pub mod common;
pub mod execute;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod validate;

pub use bootstrap::*;
pub use refresh::*;
pub use sign_in::*;
pub use validate::*;

// self
use crate::{_prelude::*, config::ClientConfig, context::SessionContext, http::ApiHttpClient};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestSessionClient = Client<ReqwestHttpClient>;

/// Request layer bound to one session.
///
/// The client owns the transport, the configuration, and a handle to the injected
/// [`SessionContext`], so every call it issues carries the session's access token. Auth failures
/// funnel through the context's single-flight refresh gate, which every client built over the
/// same context shares.
pub struct Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every outbound call.
	pub http_client: Arc<C>,
	/// Endpoint configuration.
	pub config: ClientConfig,
	/// Session state shared with every other holder of this context.
	pub context: Arc<SessionContext>,
	/// Shared metrics recorder for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
}
impl<C> Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		config: ClientConfig,
		context: Arc<SessionContext>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			config,
			context,
			refresh_metrics: Default::default(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(config: ClientConfig, context: Arc<SessionContext>) -> Self {
		Self::with_http_client(config, context, ReqwestHttpClient::default())
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			config: self.config.clone(),
			context: self.context.clone(),
			refresh_metrics: self.refresh_metrics.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url.as_str())
			.field("context", &self.context)
			.finish()
	}
}
