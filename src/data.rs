//! Data marshalling: caller timestamps, typed values, and the CSV row format.

pub mod rows;
pub mod timestamp;
pub mod value;

pub use rows::*;
pub use timestamp::*;
pub use value::*;

// std
use std::io::Cursor;
// self
use crate::_prelude::*;

/// Payload accepted by series creation, updates, and rewrites.
///
/// Callers pick the variant explicitly: decoded points are encoded to CSV by the client,
/// while [`SeriesData::Csv`] streams are forwarded untouched.
#[derive(Debug)]
pub enum SeriesData {
	/// `(timestamp, value)` pairs, normalized to epoch seconds at send time.
	Points(Vec<(Timestamp, Value)>),
	/// Pre-formatted `timestamp,value` CSV.
	Csv(CsvSource),
}
impl SeriesData {
	/// Collects `(timestamp, value)` pairs.
	pub fn points<I, T, V>(points: I) -> Self
	where
		I: IntoIterator<Item = (T, V)>,
		T: Into<Timestamp>,
		V: Into<Value>,
	{
		Self::Points(
			points.into_iter().map(|(timestamp, value)| (timestamp.into(), value.into())).collect(),
		)
	}

	/// Wraps a readable stream of CSV text.
	pub fn from_reader(reader: impl 'static + Read + Send) -> Self {
		Self::Csv(CsvSource(Box::new(reader)))
	}

	/// Wraps in-memory CSV text.
	pub fn from_csv(text: impl Into<String>) -> Self {
		Self::from_reader(Cursor::new(text.into().into_bytes()))
	}

	/// Produces the CSV bytes sent on the wire.
	pub fn into_csv_bytes(self) -> Result<Vec<u8>> {
		match self {
			SeriesData::Points(points) => Ok(encode_points(&points)?),
			SeriesData::Csv(CsvSource(mut reader)) => {
				let mut buf = Vec::new();

				reader.read_to_end(&mut buf).map_err(Error::Payload)?;

				Ok(buf)
			},
		}
	}
}

/// Boxed CSV stream inside [`SeriesData::Csv`].
pub struct CsvSource(Box<dyn Read + Send>);
impl Debug for CsvSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CsvSource(..)")
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// self
	use super::*;

	struct BrokenReader;
	impl Read for BrokenReader {
		fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
			Err(io::Error::other("disk unplugged"))
		}
	}

	#[test]
	fn points_are_encoded_as_epoch_rows() {
		let bytes = SeriesData::points([(1236735000_i64, 1.0), (1236735500, 2.5)])
			.into_csv_bytes()
			.expect("Points should encode.");

		assert_eq!(String::from_utf8(bytes).expect("CSV should be UTF-8."), "1236735000,1\n1236735500,2.5\n");
	}

	#[test]
	fn csv_streams_pass_through_untouched() {
		let raw = "1236735000,1.0\n1236735500,2.5\n1236736000,5.0";
		let bytes = SeriesData::from_csv(raw).into_csv_bytes().expect("Stream should be read.");

		assert_eq!(bytes, raw.as_bytes());
	}

	#[test]
	fn unreadable_streams_surface_payload_errors() {
		let err = SeriesData::from_reader(BrokenReader)
			.into_csv_bytes()
			.expect_err("Broken reader should fail.");

		assert!(matches!(err, Error::Payload(_)));
	}

	#[test]
	fn unparseable_timestamps_fail_before_sending() {
		let err = SeriesData::points([("not a date", 1.0)])
			.into_csv_bytes()
			.expect_err("Bad timestamp should fail.");

		assert!(matches!(err, Error::Parse(crate::error::ParseError::Timestamp { .. })));
	}
}
