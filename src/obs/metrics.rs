// self
use crate::obs::{Operation, Outcome};

/// Records a request outcome via the global metrics recorder (when enabled).
///
/// `status` is the HTTP status the service answered with; attempts and transport
/// failures carry none and are labeled `status="none"`.
pub fn record_request_outcome(operation: Operation, outcome: Outcome, status: Option<u16>) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"timetric_request_total",
			"operation" => operation.as_str(),
			"outcome" => outcome.as_str(),
			"status" => status_label(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome, status);
	}
}

/// Label value used for the `status` dimension.
pub fn status_label(status: Option<u16>) -> String {
	status.map_or_else(|| "none".to_owned(), |status| status.to_string())
}
