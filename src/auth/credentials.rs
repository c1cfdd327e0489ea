//! Consumer and token credentials, with secrets redacted from formatter output.

// self
use crate::{_prelude::*, error::ParseError};

/// Secret half of a consumer or token pair.
///
/// `Debug` and `Display` never print the wrapped value, so credentials can sit inside
/// spans and error reports without leaking.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	/// Wraps a secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw secret for signing. Never log the result.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Secret(<redacted>)")
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Application-level credentials issued when registering with Timetric.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumer {
	/// Public consumer key.
	pub key: String,
	/// Consumer secret used as the first half of every signing key.
	pub secret: Secret,
}
impl Consumer {
	/// Creates a consumer from its key and secret.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: Secret::new(secret) }
	}
}

/// OAuth token pair: request tokens during the handshake, access tokens afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
	/// Public token key, sent as `oauth_token`.
	pub key: String,
	/// Token secret used as the second half of the signing key.
	pub secret: Secret,
}
impl Token {
	/// Creates a token from its key and secret.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { key: key.into(), secret: Secret::new(secret) }
	}

	/// Parses a token endpoint body such as `oauth_token=k&oauth_token_secret=s`.
	///
	/// Unknown fields (`oauth_callback_confirmed`, `xoauth_*`) are ignored.
	pub fn from_form_body(body: &str) -> Result<Self, ParseError> {
		let mut key = None;
		let mut secret = None;

		for (name, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
			match name.as_ref() {
				"oauth_token" => key = Some(value.into_owned()),
				"oauth_token_secret" => secret = Some(value.into_owned()),
				_ => {},
			}
		}

		let key = key.ok_or(ParseError::Token { field: "oauth_token" })?;
		let secret = secret.ok_or(ParseError::Token { field: "oauth_token_secret" })?;

		Ok(Self::new(key, secret))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let token = Token::new("key", "super-secret");

		assert_eq!(format!("{}", token.secret), "<redacted>");
		assert!(!format!("{token:?}").contains("super-secret"));
		assert_eq!(token.secret.expose(), "super-secret");
	}

	#[test]
	fn token_parses_form_body_and_ignores_extras() {
		let token = Token::from_form_body(
			"oauth_token=ab%2Fc&oauth_token_secret=s3cr3t&oauth_callback_confirmed=true\n",
		)
		.expect("Token body should parse.");

		assert_eq!(token.key, "ab/c");
		assert_eq!(token.secret.expose(), "s3cr3t");
	}

	#[test]
	fn token_body_without_secret_is_rejected() {
		let err = Token::from_form_body("oauth_token=abc").expect_err("Secret is required.");

		assert!(matches!(err, ParseError::Token { field: "oauth_token_secret" }));
	}
}
