// crates.io
use httpmock::prelude::*;
// self
use timetric::{_preludet::*, auth::Token, error::ParseError};

#[test]
fn request_token_is_signed_with_consumer_only() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/oauth/request_token/")
			.query_param("oauth_consumer_key", TEST_CONSUMER_KEY)
			.query_param("oauth_signature_method", "HMAC-SHA1")
			.query_param("oauth_version", "1.0")
			.query_param_exists("oauth_signature")
			.query_param_exists("oauth_nonce")
			.query_param_exists("oauth_timestamp");
		then.status(200).body("oauth_token=request-key&oauth_token_secret=request-secret");
	});
	let client = build_unauthorized_test_client(&server.base_url());
	let token = client.request_token().expect("Request token exchange should succeed.");

	mock.assert();

	assert_eq!(token.key, "request-key");
	assert_eq!(token.secret.expose(), "request-secret");
	assert!(!client.is_authorized());
}

#[test]
fn start_authorization_builds_authorize_url() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/oauth/request_token/");
		then.status(200).body("oauth_token=request-key&oauth_token_secret=request-secret");
	});
	let client = build_unauthorized_test_client(&server.base_url());
	let session = client
		.start_authorization(Some("http://app.test/callback"))
		.expect("Authorization should start.");

	mock.assert();

	let query: BTreeMap<String, String> = session.authorize_url.query_pairs().into_owned().collect();

	assert_eq!(session.authorize_url.path(), "/oauth/authorize/");
	assert_eq!(query.get("oauth_token").map(String::as_str), Some("request-key"));
	assert_eq!(query.get("oauth_callback").map(String::as_str), Some("http://app.test/callback"));
	assert!(session.matches_callback_token("request-key"));
}

#[test]
fn access_token_installs_and_returns_token() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET)
			.path("/oauth/access_token/")
			.query_param("oauth_token", "request-key")
			.query_param("oauth_verifier", "v123")
			.query_param_exists("oauth_signature");
		then.status(200).body("oauth_token=access-key&oauth_token_secret=access-secret");
	});
	let client = build_unauthorized_test_client(&server.base_url());
	let observer = client.clone();
	let token = client
		.access_token(&Token::new("request-key", "request-secret"), Some("v123"))
		.expect("Access token exchange should succeed.");

	mock.assert();

	assert_eq!(token, Token::new("access-key", "access-secret"));
	assert!(observer.is_authorized());

	let persisted = client.config();

	assert_eq!(persisted.oauth_token.as_deref(), Some("access-key"));
	assert_eq!(persisted.oauth_secret.as_deref(), Some("access-secret"));
	assert_eq!(persisted.consumer_key.as_deref(), Some(TEST_CONSUMER_KEY));
}

#[test]
fn handshake_rejects_non_200_statuses() {
	let server = MockServer::start();
	let mock = server.mock(|when, then| {
		when.method(GET).path("/oauth/access_token/");
		then.status(401).body("signature_invalid");
	});
	let client = build_unauthorized_test_client(&server.base_url());
	let err = client
		.access_token(&Token::new("request-key", "request-secret"), None)
		.expect_err("401 should fail the exchange.");

	mock.assert();

	assert!(matches!(
		err,
		Error::UnexpectedStatus { expected: 200, status: 401, ref body, .. } if body == "signature_invalid"
	));
	assert!(!client.is_authorized());
}

#[test]
fn malformed_token_body_is_a_parse_error() {
	let server = MockServer::start();
	let _mock = server.mock(|when, then| {
		when.method(GET).path("/oauth/request_token/");
		then.status(200).body("oauth_token=only-key");
	});
	let client = build_unauthorized_test_client(&server.base_url());
	let err = client.request_token().expect_err("Missing secret should fail.");

	assert!(matches!(err, Error::Parse(ParseError::Token { field: "oauth_token_secret" })));
}
