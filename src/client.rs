//! Timetric client: credentials, transport, and the signed request pipeline.

pub mod request;

mod create;
mod handshake;

pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{Consumer, Token},
	config::{ClientConfig, ServiceEndpoints},
	error::{ConfigError, TransportError},
	http::{HttpResponse, HttpTransport},
	obs::{self, Operation, Outcome, RequestSpan, RequestSpanGuard},
	series::{Series, SeriesId},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Client specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type DefaultClient = Client<ReqwestHttpClient>;

/// Signs and sends requests to one Timetric deployment.
///
/// The client owns the consumer credentials, the resolved endpoint set, and the HTTP
/// transport. The access token lives behind a shared lock so every clone (including the
/// one held by each [`Series`]) observes the token installed by
/// [`Client::access_token`]. Handshake ordering is still the caller's responsibility.
pub struct Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Endpoints resolved from the configured base URL.
	pub endpoints: ServiceEndpoints,
	consumer: Consumer,
	access_token: Arc<RwLock<Option<Token>>>,
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Builds a client backed by a fresh [`ReqwestHttpClient`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		Self::with_http_client(config, ReqwestHttpClient::new()?)
	}
}
impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Builds a client around a caller-provided transport.
	///
	/// Fails before any network traffic when the consumer key or secret is missing or the
	/// base URL is invalid. The client starts authorized only if both `oauth_token` and
	/// `oauth_secret` are present.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let consumer = config.consumer()?;
		let endpoints = config.endpoints()?;
		let access_token = config.access_token();

		Ok(Self {
			http_client: http_client.into(),
			endpoints,
			consumer,
			access_token: Arc::new(RwLock::new(access_token)),
		})
	}

	/// Whether an access token is installed.
	pub fn is_authorized(&self) -> bool {
		self.access_token.read().is_some()
	}

	/// Currently installed access token, if any.
	pub fn current_token(&self) -> Option<Token> {
		self.access_token.read().clone()
	}

	/// Snapshot of the live credentials, ready to be persisted by the caller.
	pub fn config(&self) -> ClientConfig {
		let config = ClientConfig {
			consumer_key: Some(self.consumer.key.clone()),
			consumer_secret: Some(self.consumer.secret.expose().to_owned()),
			oauth_token: None,
			oauth_secret: None,
			base_url: Some(self.endpoints.base.to_string()),
		};

		match self.current_token() {
			Some(token) => config.with_access_token(&token),
			None => config,
		}
	}

	/// Handle for an existing series. Requires an access token.
	pub fn series(&self, id: impl AsRef<str>) -> Result<Series<C>> {
		self.require_token()?;

		let id = SeriesId::new(id).map_err(ConfigError::from)?;

		Series::new(self.clone(), id)
	}

	/// Signs and sends `request` with the access token, returning the response verbatim.
	///
	/// No status assertion happens here; callers inspect [`HttpResponse::status`].
	pub fn execute(&self, request: ApiRequest) -> Result<HttpResponse> {
		let token = self.require_token()?;

		self.dispatch(Operation::Request, request, Some(&token), None)
	}

	/// Signed request with the access token that must come back with `expected`.
	pub(crate) fn call(
		&self,
		operation: Operation,
		request: ApiRequest,
		expected: u16,
	) -> Result<HttpResponse> {
		let token = self.require_token()?;

		self.dispatch(operation, request, Some(&token), Some(expected))
	}

	pub(crate) fn dispatch(
		&self,
		operation: Operation,
		request: ApiRequest,
		token: Option<&Token>,
		expected: Option<u16>,
	) -> Result<HttpResponse> {
		let guard = RequestSpan::new(operation, request.method).entered();

		obs::record_request_outcome(operation, Outcome::Attempt, None);

		let result = self.send(operation, request, token, expected, &guard);

		match &result {
			Ok(response) =>
				obs::record_request_outcome(operation, Outcome::Success, Some(response.status)),
			Err(Error::UnexpectedStatus { status, .. }) =>
				obs::record_request_outcome(operation, Outcome::Failure, Some(*status)),
			Err(_) => obs::record_request_outcome(operation, Outcome::Failure, None),
		}

		result
	}

	fn send(
		&self,
		operation: Operation,
		request: ApiRequest,
		token: Option<&Token>,
		expected: Option<u16>,
		guard: &RequestSpanGuard,
	) -> Result<HttpResponse> {
		let http_request = request.sign(&self.consumer, token);
		let response = self.http_client.execute(http_request).map_err(TransportError::network)?;

		guard.record_status(response.status);

		match expected {
			Some(expected) if response.status != expected => Err(Error::UnexpectedStatus {
				operation: operation.as_str(),
				expected,
				status: response.status,
				body: response.body_preview(),
			}),
			_ => Ok(response),
		}
	}

	fn require_token(&self) -> Result<Token> {
		self.current_token().ok_or(Error::Unauthorized)
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			endpoints: self.endpoints.clone(),
			consumer: self.consumer.clone(),
			access_token: self.access_token.clone(),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("endpoints", &self.endpoints)
			.field("consumer_key", &self.consumer.key)
			.field("authorized", &self.is_authorized())
			.finish()
	}
}
