//! Client-side session lifecycle for the GCS source hosting API: dual-token storage,
//! transparent single-flight refresh, and user-profile bootstrapping behind one request layer.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod store;

#[cfg(test)] use gcs_session as _;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::ClientConfig,
		context::SessionContext,
		flows::Client,
		http::ReqwestHttpClient,
		store::{MemoryStorage, SessionStorage},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Persistence tiers handed to a test client so assertions can inspect them directly.
	#[derive(Clone, Debug, Default)]
	pub struct TestTiers {
		/// Volatile (tab-scoped) tier.
		pub volatile: Arc<MemoryStorage>,
		/// Durable (browser-scoped) tier.
		pub durable: Arc<MemoryStorage>,
	}

	/// Builds a [`ClientConfig`] rooted at the provided mock server base URL.
	pub fn test_config(base_url: &str) -> ClientConfig {
		let base = Url::parse(base_url).expect("Mock server base URL should parse.");

		ClientConfig::builder(base).build().expect("Test client config should build.")
	}

	/// Builds a [`SessionContext`] over in-memory tiers.
	pub fn test_context(tiers: &TestTiers) -> Arc<SessionContext> {
		let volatile: Arc<dyn SessionStorage> = tiers.volatile.clone();
		let durable: Arc<dyn SessionStorage> = tiers.durable.clone();

		Arc::new(SessionContext::new(volatile, durable))
	}

	/// Constructs a [`Client`] backed by in-memory persistence tiers and the default reqwest
	/// transport used across integration tests.
	pub fn build_reqwest_test_client(base_url: &str) -> (ReqwestTestClient, TestTiers) {
		let tiers = TestTiers::default();
		let context = test_context(&tiers);
		let client = Client::new(test_config(base_url), context);

		(client, tiers)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
