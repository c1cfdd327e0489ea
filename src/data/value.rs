//! Typed series values and their CSV tokens.

// self
use crate::{_prelude::*, error::ParseError};

/// Value stored at one point of a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
	/// Explicit gap (`null`).
	Null,
	/// Boolean reading (`true`/`false`).
	Bool(bool),
	/// Numeric reading.
	Number(f64),
}
impl Value {
	/// Numeric view: numbers as-is, booleans as `1.0`/`0.0`, null as `None`.
	pub fn as_f64(self) -> Option<f64> {
		match self {
			Value::Null => None,
			Value::Bool(flag) => Some(if flag { 1.0 } else { 0.0 }),
			Value::Number(number) => Some(number),
		}
	}

	/// Whether this is [`Value::Null`].
	pub fn is_null(self) -> bool {
		matches!(self, Value::Null)
	}
}
impl FromStr for Value {
	type Err = ParseError;

	/// `null`, `true`, and `false` match case-insensitively; anything else must be a float.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let token = s.trim();

		if token.eq_ignore_ascii_case("null") {
			Ok(Value::Null)
		} else if token.eq_ignore_ascii_case("true") {
			Ok(Value::Bool(true))
		} else if token.eq_ignore_ascii_case("false") {
			Ok(Value::Bool(false))
		} else {
			token
				.parse::<f64>()
				.map(Value::Number)
				.map_err(|_| ParseError::Value { token: s.to_owned() })
		}
	}
}
impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(flag) => write!(f, "{flag}"),
			Value::Number(number) => write!(f, "{number}"),
		}
	}
}
impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}
impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Self::Number(f64::from(value))
	}
}
/// Magnitudes above 2^53 round to the nearest representable `f64`.
impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Number(value as f64)
	}
}
impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}
impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}
impl<T> From<Option<T>> for Value
where
	T: Into<Value>,
{
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}
/// Maps JSON scalars from service responses; numeric strings are parsed like CSV tokens.
impl TryFrom<serde_json::Value> for Value {
	type Error = ParseError;

	fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
		match value {
			serde_json::Value::Null => Ok(Value::Null),
			serde_json::Value::Bool(flag) => Ok(Value::Bool(flag)),
			serde_json::Value::Number(number) => number
				.as_f64()
				.map(Value::Number)
				.ok_or_else(|| ParseError::Value { token: number.to_string() }),
			serde_json::Value::String(text) => text.parse(),
			other => Err(ParseError::Value { token: other.to_string() }),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn literals_parse_case_insensitively() {
		for (token, expected) in [
			("null", Value::Null),
			("NULL", Value::Null),
			("True", Value::Bool(true)),
			("fAlSe", Value::Bool(false)),
			("2.5", Value::Number(2.5)),
			(" -4 ", Value::Number(-4.0)),
			("1e3", Value::Number(1000.0)),
		] {
			assert_eq!(token.parse::<Value>().expect("Token should parse."), expected, "{token}");
		}
	}

	#[test]
	fn malformed_tokens_are_parse_errors() {
		for token in ["", "yes", "1,5", "nul"] {
			let err = token.parse::<Value>().expect_err("Malformed token should fail.");

			assert!(matches!(err, ParseError::Value { .. }), "{token}");
		}
	}

	#[test]
	fn display_round_trips_through_from_str() {
		for value in [Value::Null, Value::Bool(true), Value::Number(12.5), Value::Number(-3.0)] {
			assert_eq!(value.to_string().parse::<Value>().expect("Rendered token should parse."), value);
		}
	}

	#[test]
	fn json_values_map_onto_typed_values() {
		assert_eq!(Value::try_from(serde_json::json!(null)).ok(), Some(Value::Null));
		assert_eq!(Value::try_from(serde_json::json!(true)).ok(), Some(Value::Bool(true)));
		assert_eq!(Value::try_from(serde_json::json!(4.5)).ok(), Some(Value::Number(4.5)));
		assert_eq!(Value::try_from(serde_json::json!("7")).ok(), Some(Value::Number(7.0)));
		assert!(Value::try_from(serde_json::json!([1])).is_err());
	}

	#[test]
	fn numeric_view_coerces_booleans() {
		assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
		assert_eq!(Value::Null.as_f64(), None);
		assert_eq!(Value::from(None::<f64>), Value::Null);
		assert_eq!(Value::from(Some(3)), Value::Number(3.0));
	}
}
