//! Client-level error types shared across the handshake, request, and series layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem, raised before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response or caller input could not be parsed.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// An authenticated operation was attempted before the handshake completed.
	#[error("Client isn't yet authorized; complete the access token handshake first.")]
	Unauthorized,
	/// The service answered with a status other than the single expected one.
	#[error("{operation} expected HTTP {expected} but the service returned {status}.")]
	UnexpectedStatus {
		/// Operation label (see [`crate::obs::Operation`]).
		operation: &'static str,
		/// Status code the operation requires.
		expected: u16,
		/// Status code actually returned.
		status: u16,
		/// Leading part of the response body, for diagnostics.
		body: String,
	},
	/// A caller-supplied CSV stream could not be read.
	#[error("Failed to read the CSV payload.")]
	Payload(#[source] std::io::Error),
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The configuration lacks the consumer key.
	#[error("Config missing consumer key.")]
	MissingConsumerKey,
	/// The configuration lacks the consumer secret.
	#[error("Config missing consumer secret.")]
	MissingConsumerSecret,
	/// Series metadata lacks a required field.
	#[error("Series metadata is missing the required `{field}` field.")]
	MissingMetadata {
		/// Name of the missing field.
		field: &'static str,
	},
	/// Base URL or an endpoint derived from it cannot be parsed.
	#[error("Service URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Series identifier failed validation.
	#[error(transparent)]
	InvalidSeriesId(#[from] crate::series::SeriesIdError),
	/// Series creation succeeded but the response omitted `Location`.
	#[error("Series creation response is missing the Location header.")]
	MissingLocation,
	/// `Location` does not carry a series identifier.
	#[error("Series creation returned an unusable Location: {location}.")]
	InvalidLocation {
		/// Raw header value.
		location: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures while decoding service responses or normalizing caller input.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Token endpoint body lacked `oauth_token` or `oauth_token_secret`.
	#[error("Token response is missing `{field}`.")]
	Token {
		/// Missing form field.
		field: &'static str,
	},
	/// A CSV value token was neither a literal nor a number.
	#[error("Value `{token}` is not null, a boolean, or a number.")]
	Value {
		/// Offending token.
		token: String,
	},
	/// A timestamp string matched no supported layout.
	#[error("Timestamp `{input}` could not be parsed.")]
	Timestamp {
		/// Offending input.
		input: String,
	},
	/// A CSV row did not carry both timestamp and value.
	#[error("CSV row {line} has {fields} field(s); expected timestamp and value.")]
	Row {
		/// One-based line number reported by the reader.
		line: u64,
		/// Number of fields found.
		fields: usize,
	},
	/// Underlying CSV reader or writer failure.
	#[error(transparent)]
	Csv(#[from] csv::Error),
	/// JSON body could not be decoded.
	#[error("Service returned malformed JSON.")]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The latest value is null, or does not fit the requested numeric type.
	#[error("Latest value cannot be coerced into the requested number.")]
	NotNumeric,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Timetric service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Timetric service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
