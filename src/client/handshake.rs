//! Three-legged OAuth 1.0a handshake: request token, authorize URL, access token.

// self
use crate::{
	_prelude::*,
	auth::{AuthorizationSession, Token},
	client::{ApiRequest, Client},
	http::{HttpResponse, HttpTransport},
	obs::Operation,
};

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Step 0: obtains an unauthorized request token signed with the consumer only.
	pub fn request_token(&self) -> Result<Token> {
		let request = ApiRequest::get(self.endpoints.request_token.clone());
		let response = self.dispatch(Operation::RequestToken, request, None, Some(200))?;
		let token = parse_token(&response)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(token = %token.key, "Obtained request token.");

		Ok(token)
	}

	/// Step 1: URL the end user visits to authorize `request_token`.
	pub fn authorize_url(&self, request_token: &Token, callback: Option<&str>) -> Url {
		let mut url = self.endpoints.authorize.clone();

		{
			let mut query = url.query_pairs_mut();

			query.append_pair("oauth_token", &request_token.key);

			if let Some(callback) = callback {
				query.append_pair("oauth_callback", callback);
			}
		}

		url
	}

	/// Runs step 0 and builds the step 1 URL for the fresh request token.
	pub fn start_authorization(&self, callback: Option<&str>) -> Result<AuthorizationSession> {
		let request_token = self.request_token()?;
		let authorize_url = self.authorize_url(&request_token, callback);

		Ok(AuthorizationSession::new(request_token, authorize_url))
	}

	/// Step 2: exchanges an authorized request token for an access token.
	///
	/// The token is installed on this client (and every clone of it) and returned so the
	/// caller can persist it, e.g. via [`ClientConfig::with_access_token`](crate::config::ClientConfig::with_access_token).
	/// `verifier` is sent as `oauth_verifier` when the service issued one.
	pub fn access_token(&self, request_token: &Token, verifier: Option<&str>) -> Result<Token> {
		let mut request = ApiRequest::get(self.endpoints.access_token.clone());

		if let Some(verifier) = verifier {
			request = request.oauth_param("oauth_verifier", verifier);
		}

		let response =
			self.dispatch(Operation::AccessToken, request, Some(request_token), Some(200))?;
		let token = parse_token(&response)?;

		*self.access_token.write() = Some(token.clone());

		#[cfg(feature = "tracing")]
		tracing::debug!(token = %token.key, "Installed access token.");

		Ok(token)
	}
}

fn parse_token(response: &HttpResponse) -> Result<Token> {
	Ok(Token::from_form_body(&response.text())?)
}
