//! `timestamp,value` CSV rows: encoding caller points and decoding service responses.

// std
use std::io::Cursor;
// crates.io
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim, WriterBuilder};
// self
use crate::{
	_prelude::*,
	data::{Timestamp, Value},
	error::ParseError,
};

/// One decoded row of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
	/// Seconds since the Unix epoch, UTC.
	pub timestamp: f64,
	/// Typed value.
	pub value: Value,
}
impl DataPoint {
	/// Creates a point.
	pub fn new(timestamp: f64, value: impl Into<Value>) -> Self {
		Self { timestamp, value: value.into() }
	}
}

/// Encodes points as `epoch_seconds,value` lines, normalizing every timestamp.
pub fn encode_points<'a, I>(points: I) -> Result<Vec<u8>, ParseError>
where
	I: IntoIterator<Item = &'a (Timestamp, Value)>,
{
	let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());

	for (timestamp, value) in points {
		writer.write_record([timestamp.to_epoch_seconds()?.to_string(), value.to_string()])?;
	}

	writer.into_inner().map_err(|e| ParseError::Csv(e.into_error().into()))
}

/// Lazily decodes a CSV body into [`DataPoint`]s.
pub fn parse_rows(body: impl Into<Vec<u8>>) -> Rows {
	let records = ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.trim(Trim::All)
		.from_reader(Cursor::new(body.into()))
		.into_records();

	Rows { records }
}

/// Iterator returned by [`parse_rows`] and [`Series::rows`](crate::series::Series::rows).
pub struct Rows {
	records: StringRecordsIntoIter<Cursor<Vec<u8>>>,
}
impl Iterator for Rows {
	type Item = Result<DataPoint, ParseError>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let record = match self.records.next()? {
				Ok(record) => record,
				Err(e) => return Some(Err(e.into())),
			};

			// Whitespace-only lines trim down to one empty field.
			if record.len() <= 1 && record.iter().all(str::is_empty) {
				continue;
			}

			return Some(parse_record(&record));
		}
	}
}
impl Debug for Rows {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Rows(..)")
	}
}

fn parse_record(record: &StringRecord) -> Result<DataPoint, ParseError> {
	let line = record.position().map(|position| position.line()).unwrap_or_default();
	let (Some(timestamp), Some(value)) = (record.get(0), record.get(1)) else {
		return Err(ParseError::Row { line, fields: record.len() });
	};
	let timestamp = timestamp
		.parse::<f64>()
		.map_err(|_| ParseError::Timestamp { input: timestamp.to_owned() })?;

	Ok(DataPoint { timestamp, value: value.parse()? })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_typed_rows() {
		let points = parse_rows("1236735000,1.0\n1236735500,null\n1236736000,TRUE\n")
			.collect::<Result<Vec<_>, _>>()
			.expect("Rows should decode.");

		assert_eq!(
			points,
			vec![
				DataPoint::new(1236735000.0, 1.0),
				DataPoint::new(1236735500.0, Value::Null),
				DataPoint::new(1236736000.0, true),
			]
		);
	}

	#[test]
	fn empty_body_yields_nothing() {
		assert_eq!(parse_rows(Vec::<u8>::new()).count(), 0);
		assert_eq!(parse_rows("\n\n").count(), 0);
	}

	#[test]
	fn rows_of_empty_fields_are_errors() {
		let mut rows = parse_rows("1236735000,1\n,\n   \n1236735500,2\n");

		assert!(matches!(rows.next(), Some(Ok(_))));
		assert!(matches!(rows.next(), Some(Err(ParseError::Timestamp { ref input })) if input.is_empty()));
		assert!(matches!(rows.next(), Some(Ok(point)) if point.timestamp == 1236735500.0));
		assert!(rows.next().is_none());
	}

	#[test]
	fn short_rows_and_bad_tokens_are_errors() {
		let mut rows = parse_rows("1236735000\n1236735000,abc\nnope,1\n");

		assert!(matches!(rows.next(), Some(Err(ParseError::Row { line: 1, fields: 1 }))));
		assert!(matches!(rows.next(), Some(Err(ParseError::Value { .. }))));
		assert!(matches!(rows.next(), Some(Err(ParseError::Timestamp { .. }))));
		assert!(rows.next().is_none());
	}

	#[test]
	fn encoded_points_decode_to_the_same_points() {
		let points = vec![
			(Timestamp::from(1236735000_i64), Value::from(1.0)),
			(Timestamp::from("2009-03-11T01:38:20Z"), Value::from(2.5)),
			(Timestamp::from(1236736000.25), Value::Null),
			(Timestamp::from(1236736500_i64), Value::from(false)),
		];
		let encoded = encode_points(&points).expect("Points should encode.");
		let decoded =
			parse_rows(encoded).collect::<Result<Vec<_>, _>>().expect("Encoded rows should decode.");

		assert_eq!(
			decoded,
			vec![
				DataPoint::new(1236735000.0, 1.0),
				DataPoint::new(1236735500.0, 2.5),
				DataPoint::new(1236736000.25, Value::Null),
				DataPoint::new(1236736500.0, false),
			]
		);
	}
}
