//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit a `timetric.request` span per round trip with
//!   `operation`, `method`, and `status` fields.
//! - Enable `metrics` to increment the `timetric_request_total` counter for every
//!   attempt/success/failure, labeled by `operation`, `outcome`, and the HTTP `status`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations the client performs against the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Handshake step 0.
	RequestToken,
	/// Handshake step 2.
	AccessToken,
	/// Caller-built signed request.
	Request,
	/// Series creation.
	CreateSeries,
	/// Latest value read.
	Latest,
	/// Raw CSV read.
	Csv,
	/// Raw JSON dump read.
	Data,
	/// Append or set values.
	Update,
	/// Increment or decrement.
	Increment,
	/// Full replacement.
	Rewrite,
	/// Emptying a series.
	Delete,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::RequestToken => "oauth.request_token",
			Operation::AccessToken => "oauth.access_token",
			Operation::Request => "client.request",
			Operation::CreateSeries => "client.create_series",
			Operation::Latest => "series.latest",
			Operation::Csv => "series.csv",
			Operation::Data => "series.data",
			Operation::Update => "series.update",
			Operation::Increment => "series.increment",
			Operation::Rewrite => "series.rewrite",
			Operation::Delete => "series.delete",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Request about to be sent.
	Attempt,
	/// Expected status received.
	Success,
	/// Error propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
