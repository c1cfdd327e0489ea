//! Handle onto one remote series and the operations it supports.
//!
//! A [`Series`] is a thin reference: the identifier, its canonical URL, and a clone of the
//! authorized [`Client`] every call goes through. Nothing about the series contents is
//! cached, so each method is exactly one signed round trip.

pub mod id;
pub mod metadata;

pub use id::*;
pub use metadata::*;

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	data::{DataPoint, Rows, SeriesData, Timestamp, parse_rows},
	error::{ConfigError, ParseError},
	http::{HttpResponse, HttpTransport},
	obs::Operation,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Series handle backed by the default reqwest transport.
#[cfg(feature = "reqwest")]
pub type DefaultSeries = Series<ReqwestHttpClient>;

/// Payload accepted by [`Series::update`].
#[derive(Debug)]
pub enum Update {
	/// Sets the current value; sent as the `value` form field.
	Scalar(f64),
	/// Sets the current value from an integer, rendered exactly in the `value` field.
	Integer(i64),
	/// Appends points or raw CSV; sent as the `csv` multipart file.
	Data(SeriesData),
}
impl From<f64> for Update {
	fn from(value: f64) -> Self {
		Self::Scalar(value)
	}
}
impl From<i64> for Update {
	fn from(value: i64) -> Self {
		Self::Integer(value)
	}
}
impl From<i32> for Update {
	fn from(value: i32) -> Self {
		Self::Integer(i64::from(value))
	}
}
impl From<SeriesData> for Update {
	fn from(value: SeriesData) -> Self {
		Self::Data(value)
	}
}

/// Reference to a remote series reachable through an authorized [`Client`].
pub struct Series<C>
where
	C: ?Sized + HttpTransport,
{
	client: Client<C>,
	id: SeriesId,
	url: Url,
}
impl<C> Series<C>
where
	C: ?Sized + HttpTransport,
{
	pub(crate) fn new(client: Client<C>, id: SeriesId) -> Result<Self> {
		let url = client.endpoints.series(&id)?;

		Ok(Self { client, id, url })
	}

	/// Remote identifier.
	pub fn id(&self) -> &SeriesId {
		&self.id
	}

	/// Canonical series URL, always ending in `/`.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Client the handle issues requests through.
	pub fn client(&self) -> &Client<C> {
		&self.client
	}

	/// Fetches the most recent point from `value/json/`.
	pub fn latest(&self) -> Result<DataPoint> {
		let response =
			self.client.call(Operation::Latest, ApiRequest::get(self.join("value/json/")?), 200)?;
		let latest: LatestBody = decode_json(&response)?;

		Ok(DataPoint { timestamp: latest.timestamp.to_epoch_seconds()?, value: latest.value.try_into()? })
	}

	/// Latest value as a float; booleans count as `1.0`/`0.0`.
	pub fn as_float(&self) -> Result<f64> {
		Ok(self.latest()?.value.as_f64().ok_or(ParseError::NotNumeric)?)
	}

	/// Latest value truncated toward zero; NaN, infinities, and values outside `i64` fail.
	pub fn as_int(&self) -> Result<i64> {
		Ok(truncate_to_i64(self.as_float()?)?)
	}

	/// Downloads the full series as `timestamp,value` CSV text.
	pub fn csv(&self) -> Result<String> {
		let response = self.client.call(Operation::Csv, ApiRequest::get(self.join("csv/")?), 200)?;

		Ok(response.text())
	}

	/// Fetches the CSV once and decodes rows lazily; call again to start over.
	pub fn rows(&self) -> Result<Rows> {
		let response = self.client.call(Operation::Csv, ApiRequest::get(self.join("csv/")?), 200)?;

		Ok(parse_rows(response.body))
	}

	/// Collects every row of the series.
	pub fn points(&self) -> Result<Vec<DataPoint>> {
		Ok(self.rows()?.collect::<Result<Vec<_>, _>>()?)
	}

	/// Raw JSON dump from `json/`.
	pub fn data(&self) -> Result<serde_json::Value> {
		let response = self.client.call(Operation::Data, ApiRequest::get(self.join("json/")?), 200)?;

		decode_json(&response)
	}

	/// Sets the current value or appends data.
	pub fn update(&self, update: impl Into<Update>) -> Result<()> {
		let request = match update.into() {
			Update::Scalar(value) => ApiRequest::post(self.url.clone()).param("value", value.to_string()),
			Update::Integer(value) =>
				ApiRequest::post(self.url.clone()).param("value", value.to_string()),
			Update::Data(data) => ApiRequest::post(self.url.clone()).file("csv", data.into_csv_bytes()?),
		};

		self.client.call(Operation::Update, request, 204)?;

		Ok(())
	}

	/// Adds `amount` (negative to decrement) to the current value.
	pub fn increment(&self, amount: f64) -> Result<()> {
		let request = ApiRequest::post(self.url.clone()).param("increment", amount.to_string());

		self.client.call(Operation::Increment, request, 204)?;

		Ok(())
	}

	/// Replaces the entire series contents with `data`.
	pub fn rewrite(&self, data: SeriesData) -> Result<()> {
		let request = ApiRequest::put(self.url.clone()).raw_body("text/csv", data.into_csv_bytes()?);

		self.client.call(Operation::Rewrite, request, 204)?;

		Ok(())
	}

	/// Deletes every point; the identifier itself stays valid.
	pub fn delete(&self) -> Result<()> {
		self.client.call(Operation::Delete, ApiRequest::delete(self.url.clone()), 204)?;

		Ok(())
	}

	fn join(&self, path: &str) -> Result<Url> {
		Ok(self.url.join(path).map_err(|source| ConfigError::InvalidUrl { source })?)
	}
}
impl<C> Clone for Series<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), id: self.id.clone(), url: self.url.clone() }
	}
}
impl<C> Debug for Series<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Series").field("id", &self.id).field("url", &self.url.as_str()).finish()
	}
}
impl<C> Display for Series<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Series({})", self.id)
	}
}

#[derive(Debug, Deserialize)]
struct LatestBody {
	timestamp: LatestTimestamp,
	#[serde(default)]
	value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LatestTimestamp {
	Number(f64),
	Text(String),
}
impl LatestTimestamp {
	fn to_epoch_seconds(&self) -> Result<f64, ParseError> {
		match self {
			LatestTimestamp::Number(seconds) => Ok(*seconds),
			LatestTimestamp::Text(text) => Timestamp::from(text.as_str()).to_epoch_seconds(),
		}
	}
}

fn truncate_to_i64(value: f64) -> Result<i64, ParseError> {
	// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
	const BOUND: f64 = 9_223_372_036_854_775_808.0;

	let truncated = value.trunc();

	if truncated.is_finite() && (-BOUND..BOUND).contains(&truncated) {
		Ok(truncated as i64)
	} else {
		Err(ParseError::NotNumeric)
	}
}

fn decode_json<T>(response: &HttpResponse) -> Result<T>
where
	T: for<'de> Deserialize<'de>,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	Ok(serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ParseError::Json { source })?)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn latest_timestamps_accept_numbers_and_strings() {
		let body: LatestBody = serde_json::from_str(r#"{"timestamp":"2009-03-11T01:30:00Z","value":1}"#)
			.expect("Latest body should decode.");

		assert_eq!(body.timestamp.to_epoch_seconds().ok(), Some(1236735000.0));

		let body: LatestBody = serde_json::from_str(r#"{"timestamp":1236735000.5,"value":null}"#)
			.expect("Latest body should decode.");

		assert_eq!(body.timestamp.to_epoch_seconds().ok(), Some(1236735000.5));
		assert!(body.value.is_null());
	}

	#[test]
	fn integer_updates_keep_every_digit() {
		let big = 9_007_199_254_740_993_i64;

		assert!(matches!(
			Update::from(big),
			Update::Integer(value) if value.to_string() == "9007199254740993"
		));
		assert!(matches!(Update::from(3), Update::Integer(3)));
		assert!(matches!(Update::from(2.5), Update::Scalar(value) if value == 2.5));
		assert!(matches!(Update::from(SeriesData::from_csv("1,2\n")), Update::Data(_)));
	}

	#[test]
	fn integer_coercion_rejects_non_finite_and_out_of_range() {
		assert_eq!(truncate_to_i64(-42.75).ok(), Some(-42));
		assert_eq!(truncate_to_i64(9.9).ok(), Some(9));

		for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e19, -1e19] {
			assert!(matches!(truncate_to_i64(value), Err(ParseError::NotNumeric)), "{value}");
		}
	}
}
