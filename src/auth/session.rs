//! Handshake metadata handed to callers between step 0 and step 2.

// self
use crate::{_prelude::*, auth::Token};

/// Result of [`Client::start_authorization`](crate::client::Client::start_authorization).
///
/// Send the end user to `authorize_url`, then pass `request_token` (plus the verifier the
/// service hands back, if any) to
/// [`Client::access_token`](crate::client::Client::access_token).
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Unauthorized request token obtained during step 0.
	pub request_token: Token,
	/// URL the end user must visit to grant access.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	/// Bundles a request token with its authorize URL.
	pub fn new(request_token: Token, authorize_url: Url) -> Self {
		Self { request_token, authorize_url }
	}

	/// Checks the `oauth_token` echoed on the callback against the request token.
	pub fn matches_callback_token(&self, returned_token: &str) -> bool {
		returned_token == self.request_token.key
	}
}
