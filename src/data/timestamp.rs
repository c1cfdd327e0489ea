//! Caller-supplied timestamps and their normalization to epoch seconds.

// crates.io
use time::{
	Date, PrimitiveDateTime,
	format_description::{
		BorrowedFormatItem,
		well_known::{Iso8601, Rfc2822, Rfc3339},
	},
	macros::format_description,
};
// self
use crate::{_prelude::*, error::ParseError};

const DATE_TIME_LAYOUTS: &[&[BorrowedFormatItem<'static>]] = &[
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
	format_description!("[year]-[month]-[day] [hour]:[minute]"),
	format_description!("[year]/[month]/[day] [hour]:[minute]:[second]"),
	format_description!("[year]/[month]/[day] [hour]:[minute]"),
];
const DATE_LAYOUTS: &[&[BorrowedFormatItem<'static>]] = &[
	format_description!("[year]-[month]-[day]"),
	format_description!("[year]/[month]/[day]"),
	format_description!(
		"[day padding:none] [month repr:short case_sensitive:false] [year]"
	),
	format_description!(
		"[day padding:none] [month repr:long case_sensitive:false] [year]"
	),
	format_description!(
		"[month repr:short case_sensitive:false] [day padding:none] [year]"
	),
	format_description!(
		"[month repr:long case_sensitive:false] [day padding:none], [year]"
	),
];

/// Timestamp in any of the shapes callers may hold.
#[derive(Clone, Debug, PartialEq)]
pub enum Timestamp {
	/// Calendar date/time with an explicit offset.
	DateTime(OffsetDateTime),
	/// Seconds since the Unix epoch.
	Epoch(f64),
	/// Numeric string or human-readable date.
	Text(String),
}
impl Timestamp {
	/// Normalizes the timestamp to UTC epoch seconds.
	///
	/// Date/times convert directly (sub-second precision kept). Text is first tried as a
	/// number, then against RFC 3339, RFC 2822, ISO 8601, and a handful of common
	/// layouts; layouts without an offset are read as UTC.
	pub fn to_epoch_seconds(&self) -> Result<f64, ParseError> {
		match self {
			Timestamp::DateTime(moment) => Ok(epoch_seconds(*moment)),
			Timestamp::Epoch(seconds) => Ok(*seconds),
			Timestamp::Text(text) => parse_timestamp(text),
		}
	}
}
impl From<OffsetDateTime> for Timestamp {
	fn from(value: OffsetDateTime) -> Self {
		Self::DateTime(value)
	}
}
impl From<PrimitiveDateTime> for Timestamp {
	fn from(value: PrimitiveDateTime) -> Self {
		Self::DateTime(value.assume_utc())
	}
}
impl From<Date> for Timestamp {
	fn from(value: Date) -> Self {
		Self::DateTime(value.midnight().assume_utc())
	}
}
impl From<f64> for Timestamp {
	fn from(value: f64) -> Self {
		Self::Epoch(value)
	}
}
/// Magnitudes above 2^53 round to the nearest representable `f64`.
impl From<i64> for Timestamp {
	fn from(value: i64) -> Self {
		Self::Epoch(value as f64)
	}
}
impl From<i32> for Timestamp {
	fn from(value: i32) -> Self {
		Self::Epoch(f64::from(value))
	}
}
impl From<&str> for Timestamp {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for Timestamp {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

/// Parses a numeric or human-readable timestamp string into UTC epoch seconds.
pub fn parse_timestamp(input: &str) -> Result<f64, ParseError> {
	let trimmed = input.trim();

	if let Ok(seconds) = trimmed.parse::<f64>() {
		return Ok(seconds);
	}

	parse_date_string(trimmed)
		.map(epoch_seconds)
		.ok_or_else(|| ParseError::Timestamp { input: input.to_owned() })
}

fn parse_date_string(text: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(text, &Rfc3339)
		.or_else(|_| OffsetDateTime::parse(text, &Rfc2822))
		.or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
		.ok()
		.or_else(|| PrimitiveDateTime::parse(text, &Iso8601::DEFAULT).ok().map(|dt| dt.assume_utc()))
		.or_else(|| {
			DATE_TIME_LAYOUTS
				.iter()
				.find_map(|layout| PrimitiveDateTime::parse(text, *layout).ok())
				.map(PrimitiveDateTime::assume_utc)
		})
		.or_else(|| {
			DATE_LAYOUTS
				.iter()
				.find_map(|layout| Date::parse(text, *layout).ok())
				.map(|date| date.midnight().assume_utc())
		})
}

fn epoch_seconds(moment: OffsetDateTime) -> f64 {
	moment.unix_timestamp() as f64 + f64::from(moment.nanosecond()) / 1e9
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::{date, datetime};
	// self
	use super::*;

	const INSTANT: f64 = 1236735000.0;

	#[test]
	fn every_shape_of_one_instant_normalizes_identically() {
		let shapes = [
			Timestamp::from(datetime!(2009-03-11 01:30:00 UTC)),
			Timestamp::from(datetime!(2009-03-11 03:30:00 +02:00)),
			Timestamp::from(datetime!(2009-03-11 01:30:00)),
			Timestamp::from(1236735000_i64),
			Timestamp::from(INSTANT),
			Timestamp::from("1236735000"),
			Timestamp::from(" 1236735000.0 "),
			Timestamp::from("2009-03-11T01:30:00Z"),
			Timestamp::from("2009-03-11T01:30:00+00:00"),
			Timestamp::from("Wed, 11 Mar 2009 01:30:00 +0000"),
			Timestamp::from("2009-03-11 01:30:00"),
			Timestamp::from("2009-03-11 01:30"),
			Timestamp::from("2009/03/11 01:30:00"),
			Timestamp::from("2009-03-11T01:30:00"),
		];

		for shape in shapes {
			assert_eq!(shape.to_epoch_seconds().expect("Timestamp should parse."), INSTANT, "{shape:?}");
		}
	}

	#[test]
	fn date_only_inputs_mean_midnight_utc() {
		let midnight = 1236643200.0;

		assert_eq!(Timestamp::from(date!(2009-03-10)).to_epoch_seconds().ok(), Some(midnight));

		for text in ["2009-03-10", "2009/03/10", "10 Mar 2009", "10 march 2009", "Mar 10 2009", "March 10, 2009"] {
			assert_eq!(parse_timestamp(text).ok(), Some(midnight), "{text}");
		}
	}

	#[test]
	fn sub_second_precision_is_kept() {
		let moment = datetime!(2009-03-11 01:30:00.5 UTC);

		assert_eq!(Timestamp::from(moment).to_epoch_seconds().ok(), Some(INSTANT + 0.5));
	}

	#[test]
	fn garbage_is_rejected() {
		let err = parse_timestamp("next tuesday-ish").expect_err("Garbage should not parse.");

		assert!(matches!(err, ParseError::Timestamp { input } if input == "next tuesday-ish"));
	}
}
