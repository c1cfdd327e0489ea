//! OAuth 1.0a request signing (HMAC-SHA1, RFC 5849).
//!
//! [`OAuthRequest`] collects the method, URL, and signable parameters of one request;
//! [`OAuthRequest::sign`] stamps protocol parameters and produces a [`SignedRequest`],
//! which renders the three transmission forms the service accepts: a signed URL, an
//! `Authorization` header, or a form-encoded body.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{Consumer, Token},
	http::HttpMethod,
};

/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

const NONCE_LEN: usize = 32;
// RFC 3986 unreserved characters pass through; everything else is `%XX`.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

type HmacSha1 = Hmac<Sha1>;

/// Percent-encodes `value` with the RFC 3986 rules OAuth mandates.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Unsigned request description.
#[derive(Clone, Debug)]
pub struct OAuthRequest {
	method: HttpMethod,
	url: Url,
	params: Vec<(String, String)>,
	protocol: Vec<(String, String)>,
}
impl OAuthRequest {
	/// Starts a request; query parameters already on `url` become signable parameters.
	pub fn new(method: HttpMethod, url: &Url) -> Self {
		let params = url.query_pairs().into_owned().collect();

		Self { method, url: url.clone(), params, protocol: Vec::new() }
	}

	/// Adds a signable request parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));

		self
	}

	/// Adds several signable request parameters.
	pub fn params<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.params.extend(params.into_iter().map(|(name, value)| (name.into(), value.into())));

		self
	}

	/// Adds an extra protocol parameter such as `oauth_verifier`.
	pub fn protocol_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.protocol.push((name.into(), value.into()));

		self
	}

	/// Signs with a fresh random nonce and the current time.
	pub fn sign(self, consumer: &Consumer, token: Option<&Token>) -> SignedRequest {
		let nonce = generate_nonce();
		let timestamp = OffsetDateTime::now_utc().unix_timestamp();

		self.sign_with(consumer, token, &nonce, timestamp)
	}

	/// Signs with caller-provided nonce and timestamp.
	pub fn sign_with(
		mut self,
		consumer: &Consumer,
		token: Option<&Token>,
		nonce: &str,
		timestamp: i64,
	) -> SignedRequest {
		self.protocol.extend([
			("oauth_consumer_key".to_owned(), consumer.key.clone()),
			("oauth_nonce".to_owned(), nonce.to_owned()),
			("oauth_signature_method".to_owned(), SIGNATURE_METHOD.to_owned()),
			("oauth_timestamp".to_owned(), timestamp.to_string()),
			("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
		]);

		if let Some(token) = token {
			self.protocol.push(("oauth_token".to_owned(), token.key.clone()));
		}

		self.protocol.sort();

		let base_string = self.signature_base_string();
		let signature = compute_signature(
			&base_string,
			consumer.secret.expose(),
			token.map(|token| token.secret.expose()).unwrap_or_default(),
		);

		self.protocol.push(("oauth_signature".to_owned(), signature));

		SignedRequest { request: self, base_string }
	}

	/// `scheme://host[:port]/path` with default ports dropped and no query or fragment.
	pub fn normalized_url(&self) -> String {
		normalize_url(&self.url)
	}

	/// `METHOD&url&params`, each component percent-encoded.
	pub fn signature_base_string(&self) -> String {
		let params = self
			.params
			.iter()
			.chain(self.protocol.iter())
			.filter(|(name, _)| name != "oauth_signature");

		format!(
			"{}&{}&{}",
			self.method.as_str(),
			percent_encode(&self.normalized_url()),
			percent_encode(&normalize_params(params)),
		)
	}
}

/// Request carrying its `oauth_signature`.
#[derive(Clone, Debug)]
pub struct SignedRequest {
	request: OAuthRequest,
	base_string: String,
}
impl SignedRequest {
	/// Base string the signature was computed over.
	pub fn base_string(&self) -> &str {
		&self.base_string
	}

	/// Base64 HMAC-SHA1 signature.
	pub fn signature(&self) -> &str {
		self.protocol_value("oauth_signature").unwrap_or_default()
	}

	/// Looks up a protocol parameter by name.
	pub fn protocol_value(&self, name: &str) -> Option<&str> {
		self.request
			.protocol
			.iter()
			.find(|(candidate, _)| candidate == name)
			.map(|(_, value)| value.as_str())
	}

	/// Normalized URL with every parameter, protocol ones included, in the query.
	pub fn to_url(&self) -> Url {
		let mut url = self.request.url.clone();

		url.set_fragment(None);
		url.set_query(Some(&self.to_postdata()));

		url
	}

	/// Every parameter form-encoded, for `application/x-www-form-urlencoded` bodies.
	pub fn to_postdata(&self) -> String {
		normalize_params(self.request.params.iter().chain(self.request.protocol.iter()))
	}

	/// `Authorization` header value carrying only the protocol parameters.
	pub fn to_header(&self) -> String {
		let mut header = String::from("OAuth realm=\"\"");

		for (name, value) in &self.request.protocol {
			header.push_str(&format!(", {}=\"{}\"", percent_encode(name), percent_encode(value)));
		}

		header
	}
}

fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

fn normalize_url(url: &Url) -> String {
	let scheme = url.scheme().to_ascii_lowercase();
	let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
	let port = url.port().map(|port| format!(":{port}")).unwrap_or_default();

	format!("{scheme}://{host}{port}{}", url.path())
}

fn normalize_params<'a>(params: impl Iterator<Item = &'a (String, String)>) -> String {
	let mut encoded: Vec<(String, String)> =
		params.map(|(name, value)| (percent_encode(name), percent_encode(value))).collect();

	encoded.sort();

	encoded.into_iter().map(|(name, value)| format!("{name}={value}")).collect::<Vec<_>>().join("&")
}

fn compute_signature(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
	let key = format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret));
	// HMAC accepts keys of any length.
	let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC key length is unbounded.");

	mac.update(base_string.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}
