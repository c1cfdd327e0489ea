//! Blocking Timetric client: OAuth 1.0a handshake + HMAC-SHA1 request signing, series
//! creation, and CSV/JSON marshalling for time-series data.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod series;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{auth::Token, client::Client, config::ClientConfig, http::ReqwestHttpClient};

	/// Consumer key shared by integration tests.
	pub const TEST_CONSUMER_KEY: &str = "consumer-key";
	/// Consumer secret shared by integration tests.
	pub const TEST_CONSUMER_SECRET: &str = "consumer-secret";
	/// Access token key shared by integration tests.
	pub const TEST_ACCESS_KEY: &str = "access-key";
	/// Access token secret shared by integration tests.
	pub const TEST_ACCESS_SECRET: &str = "access-secret";

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient>;

	/// Builds a consumer-only configuration pointed at `base_url`.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::from_pairs([
			("consumer_key", TEST_CONSUMER_KEY),
			("consumer_secret", TEST_CONSUMER_SECRET),
			("base_url", base_url),
		])
	}

	/// Constructs a client that has not completed the handshake yet.
	pub fn build_unauthorized_test_client(base_url: &str) -> ReqwestTestClient {
		Client::new(test_config(base_url)).expect("Failed to build unauthorized test client.")
	}

	/// Constructs a client that already carries the shared test access token.
	pub fn build_authorized_test_client(base_url: &str) -> ReqwestTestClient {
		let config = test_config(base_url)
			.with_access_token(&Token::new(TEST_ACCESS_KEY, TEST_ACCESS_SECRET));

		Client::new(config).expect("Failed to build authorized test client.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		io::Read,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Error as ReqwestError, blocking::Client as ReqwestClient};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
