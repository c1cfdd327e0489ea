// self
use crate::{_prelude::*, http::HttpMethod, obs::Operation};

/// Span wrapping one round trip to the service.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a span tagged with the operation and HTTP method; `status` starts empty.
	pub fn new(operation: Operation, method: HttpMethod) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"timetric.request",
				operation = operation.as_str(),
				method = method.as_str(),
				status = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, method);

			Self {}
		}
	}

	/// Enters the span for the duration of the blocking call.
	pub fn entered(self) -> RequestSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RequestSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RequestSpanGuard {}
		}
	}
}

/// RAII guard returned by [`RequestSpan::entered`].
pub struct RequestSpanGuard {
	#[cfg(feature = "tracing")]
	guard: tracing::span::EnteredSpan,
}
impl RequestSpanGuard {
	/// Records the HTTP status returned by the service.
	pub fn record_status(&self, status: u16) {
		#[cfg(feature = "tracing")]
		{
			self.guard.record("status", status);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}
}
impl Debug for RequestSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RequestSpanGuard(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_span_records_status_without_subscriber() {
		let guard = RequestSpan::new(Operation::Latest, HttpMethod::Get).entered();

		guard.record_status(200);
	}
}
