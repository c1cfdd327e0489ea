//! Client configuration and the endpoint set derived from the service base URL.
//!
//! [`ClientConfig`] mirrors the flat key/value mapping Timetric applications
//! traditionally keep on disk (`consumer_key`, `consumer_secret`, `oauth_token`,
//! `oauth_secret`). The crate never writes it back in place: once the handshake
//! completes, callers obtain an updated copy via [`ClientConfig::with_access_token`]
//! or [`Client::config`](crate::client::Client::config) and persist it themselves.

// self
use crate::{
	_prelude::*,
	auth::{Consumer, Token},
	error::ConfigError,
	series::SeriesId,
};

/// Base URL of the hosted Timetric service.
pub const DEFAULT_BASE_URL: &str = "http://timetric.com/";

/// Flat credential mapping accepted by [`Client::new`](crate::client::Client::new).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// Application consumer key (required).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub consumer_key: Option<String>,
	/// Application consumer secret (required).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub consumer_secret: Option<String>,
	/// Access token key obtained from a completed handshake.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oauth_token: Option<String>,
	/// Access token secret obtained from a completed handshake.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oauth_secret: Option<String>,
	/// Service base URL; defaults to [`DEFAULT_BASE_URL`].
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
}
impl ClientConfig {
	/// Builds a config from string pairs, ignoring unknown keys.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut config = Self::default();

		for (key, value) in pairs {
			let slot = match key.as_ref() {
				"consumer_key" => &mut config.consumer_key,
				"consumer_secret" => &mut config.consumer_secret,
				"oauth_token" => &mut config.oauth_token,
				"oauth_secret" => &mut config.oauth_secret,
				"base_url" => &mut config.base_url,
				_ => continue,
			};

			*slot = Some(value.into());
		}

		config
	}

	/// Returns a copy carrying `token` as the access token.
	pub fn with_access_token(mut self, token: &Token) -> Self {
		self.oauth_token = Some(token.key.clone());
		self.oauth_secret = Some(token.secret.expose().to_owned());

		self
	}

	/// Flattens the config back into string pairs suitable for a key/value store.
	pub fn to_pairs(&self) -> BTreeMap<&'static str, String> {
		[
			("consumer_key", &self.consumer_key),
			("consumer_secret", &self.consumer_secret),
			("oauth_token", &self.oauth_token),
			("oauth_secret", &self.oauth_secret),
			("base_url", &self.base_url),
		]
		.into_iter()
		.filter_map(|(key, value)| value.clone().map(|value| (key, value)))
		.collect()
	}

	pub(crate) fn consumer(&self) -> Result<Consumer, ConfigError> {
		let key = self.consumer_key.as_deref().ok_or(ConfigError::MissingConsumerKey)?;
		let secret = self.consumer_secret.as_deref().ok_or(ConfigError::MissingConsumerSecret)?;

		Ok(Consumer::new(key, secret))
	}

	pub(crate) fn access_token(&self) -> Option<Token> {
		match (&self.oauth_token, &self.oauth_secret) {
			(Some(key), Some(secret)) => Some(Token::new(key, secret)),
			_ => None,
		}
	}

	pub(crate) fn endpoints(&self) -> Result<ServiceEndpoints, ConfigError> {
		ServiceEndpoints::from_base(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret_set", &self.consumer_secret.is_some())
			.field("oauth_token", &self.oauth_token)
			.field("oauth_secret_set", &self.oauth_secret.is_some())
			.field("base_url", &self.base_url)
			.finish()
	}
}

/// Fixed endpoint set exposed by the service, resolved against one base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEndpoints {
	/// Service root every other endpoint hangs off.
	pub base: Url,
	/// Step 0: request token endpoint.
	pub request_token: Url,
	/// Step 1: user authorization page.
	pub authorize: Url,
	/// Step 2: access token endpoint.
	pub access_token: Url,
	/// Series creation endpoint.
	pub create: Url,
}
impl ServiceEndpoints {
	/// Resolves every endpoint against `base`, appending a trailing slash when missing.
	pub fn from_base(base: &str) -> Result<Self, ConfigError> {
		let base = if base.ends_with('/') { base.to_owned() } else { format!("{base}/") };
		let base = Url::parse(&base).map_err(|source| ConfigError::InvalidUrl { source })?;
		let join = |path: &str| base.join(path).map_err(|source| ConfigError::InvalidUrl { source });

		Ok(Self {
			request_token: join("oauth/request_token/")?,
			authorize: join("oauth/authorize/")?,
			access_token: join("oauth/access_token/")?,
			create: join("create/")?,
			base,
		})
	}

	/// Canonical URL of one series: `{base}series/{id}/`.
	pub fn series(&self, id: &SeriesId) -> Result<Url, ConfigError> {
		self.base
			.join(&format!("series/{id}/"))
			.map_err(|source| ConfigError::InvalidUrl { source })
	}
}
