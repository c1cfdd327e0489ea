//! Caller-facing request description and its signed wire form.

// self
use crate::{
	_prelude::*,
	auth::{Consumer, Token},
	http::{HttpMethod, HttpRequest, MULTIPART_CONTENT_TYPE, MultipartForm},
	oauth::OAuthRequest,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How the body of a `POST`/`PUT` is transmitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
	/// Parameters and OAuth parameters form-encoded together.
	#[default]
	Form,
	/// Parameters become multipart fields, followed by these file parts.
	Multipart(Vec<(String, Vec<u8>)>),
	/// Opaque bytes sent with an explicit content type.
	Raw {
		/// `Content-Type` header value.
		content_type: String,
		/// Body bytes.
		bytes: Vec<u8>,
	},
}

/// Unsigned request handed to [`Client::execute`](crate::client::Client::execute).
///
/// `GET`/`DELETE` requests carry every parameter in the signed query string. `POST`/`PUT`
/// requests default to a form body; attaching a file switches to multipart and
/// [`ApiRequest::raw_body`] sends bytes as-is. Both of the latter carry the OAuth
/// parameters in the `Authorization` header. Multipart fields are signed like form
/// parameters; raw-body parameters travel (signed) in the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// Request method.
	pub method: HttpMethod,
	/// Target URL; any query it carries is signed along with `params`.
	pub url: Url,
	/// Request parameters, in insertion order.
	pub params: Vec<(String, String)>,
	/// Extra OAuth protocol parameters such as `oauth_verifier`.
	pub oauth_params: Vec<(String, String)>,
	/// Extra headers passed through untouched.
	pub headers: Vec<(String, String)>,
	/// Body shape for `POST`/`PUT`.
	pub body: RequestBody,
}
impl ApiRequest {
	/// Creates a request without parameters.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self {
			method,
			url,
			params: Vec::new(),
			oauth_params: Vec::new(),
			headers: Vec::new(),
			body: RequestBody::Form,
		}
	}

	/// `GET` request.
	pub fn get(url: Url) -> Self {
		Self::new(HttpMethod::Get, url)
	}

	/// `POST` request.
	pub fn post(url: Url) -> Self {
		Self::new(HttpMethod::Post, url)
	}

	/// `PUT` request.
	pub fn put(url: Url) -> Self {
		Self::new(HttpMethod::Put, url)
	}

	/// `DELETE` request.
	pub fn delete(url: Url) -> Self {
		Self::new(HttpMethod::Delete, url)
	}

	/// Adds a request parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.push((name.into(), value.into()));

		self
	}

	/// Adds an OAuth protocol parameter, signed and sent alongside the `oauth_*` set.
	pub fn oauth_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.oauth_params.push((name.into(), value.into()));

		self
	}

	/// Adds an extra header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Switches the body to multipart, even when no file part follows.
	pub fn multipart(mut self) -> Self {
		if !matches!(self.body, RequestBody::Multipart(_)) {
			self.body = RequestBody::Multipart(Vec::new());
		}

		self
	}

	/// Attaches a file part, switching the body to multipart.
	pub fn file(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
		let part = (name.into(), contents.into());

		match &mut self.body {
			RequestBody::Multipart(files) => files.push(part),
			body => *body = RequestBody::Multipart(vec![part]),
		}

		self
	}

	/// Sends `bytes` as the body with `content_type`.
	pub fn raw_body(mut self, content_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		self.body = RequestBody::Raw { content_type: content_type.into(), bytes: bytes.into() };

		self
	}

	/// Signs the request and renders it for the transport.
	pub fn sign(self, consumer: &Consumer, token: Option<&Token>) -> HttpRequest {
		let Self { method, url, params, oauth_params, mut headers, body } = self;
		let unsigned = |target: &Url| {
			oauth_params.iter().fold(OAuthRequest::new(method, target), |request, (name, value)| {
				request.protocol_param(name.clone(), value.clone())
			})
		};

		if !method.carries_body() {
			let signed = unsigned(&url).params(params).sign(consumer, token);

			return HttpRequest { method, url: signed.to_url(), headers, body: None };
		}

		let (url, body) = match body {
			RequestBody::Form => {
				let signed = unsigned(&url).params(params).sign(consumer, token);
				let mut target = url;

				target.set_query(None);
				headers.push(("Content-Type".into(), FORM_CONTENT_TYPE.into()));

				(target, signed.to_postdata().into_bytes())
			},
			RequestBody::Multipart(files) => {
				let signed = unsigned(&url).params(params.clone()).sign(consumer, token);
				let mut form = MultipartForm::new();

				for (name, value) in params {
					form = form.field(name, value);
				}
				for (name, contents) in files {
					form = form.file(name, contents);
				}

				headers.push(("Authorization".into(), signed.to_header()));
				headers.push(("Content-Type".into(), MULTIPART_CONTENT_TYPE.into()));

				(url, form.encode())
			},
			RequestBody::Raw { content_type, bytes } => {
				let mut target = url;

				if !params.is_empty() {
					target.query_pairs_mut().extend_pairs(params);
				}

				let signed = unsigned(&target).sign(consumer, token);

				headers.push(("Authorization".into(), signed.to_header()));
				headers.push(("Content-Type".into(), content_type));

				(target, bytes)
			},
		};

		HttpRequest { method, url, headers, body: Some(body) }
	}
}
