//! Validated remote series identifier.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

const SERIES_ID_MAX_LEN: usize = 128;

/// Error returned when a series identifier fails validation.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SeriesIdError {
	/// The identifier was empty.
	#[error("Series identifier cannot be empty.")]
	Empty,
	/// The identifier contains whitespace characters.
	#[error("Series identifier contains whitespace.")]
	ContainsWhitespace,
	/// The identifier contains a character that would change the series URL.
	#[error("Series identifier contains the reserved character `{character}`.")]
	ReservedCharacter {
		/// Offending character.
		character: char,
	},
	/// The identifier exceeded the allowed character count.
	#[error("Series identifier exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Opaque identifier the service assigns to a series.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesId(String);
impl SeriesId {
	/// Creates a new identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, SeriesIdError> {
		let view = value.as_ref();

		validate(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for SeriesId {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for SeriesId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for SeriesId {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<SeriesId> for String {
	fn from(value: SeriesId) -> Self {
		value.0
	}
}
impl TryFrom<String> for SeriesId {
	type Error = SeriesIdError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate(&value)?;

		Ok(Self(value))
	}
}
impl TryFrom<&str> for SeriesId {
	type Error = SeriesIdError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for SeriesId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "SeriesId({})", self.0)
	}
}
impl Display for SeriesId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for SeriesId {
	type Err = SeriesIdError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

fn validate(view: &str) -> Result<(), SeriesIdError> {
	if view.is_empty() {
		return Err(SeriesIdError::Empty);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(SeriesIdError::ContainsWhitespace);
	}
	if let Some(character) = view.chars().find(|c| matches!(c, '/' | '?' | '#')) {
		return Err(SeriesIdError::ReservedCharacter { character });
	}
	if view.len() > SERIES_ID_MAX_LEN {
		return Err(SeriesIdError::TooLong { max: SERIES_ID_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn series_id_validation() {
		assert!(SeriesId::new("").is_err());
		assert!(SeriesId::new(" id").is_err());
		assert!(SeriesId::new("x".repeat(SERIES_ID_MAX_LEN + 1)).is_err());
		assert_eq!(SeriesId::new("a/b"), Err(SeriesIdError::ReservedCharacter { character: '/' }));
		assert!(SeriesId::new("ZEDpH4pcQk2ZM-xLfQfBXw").is_ok());
	}

	#[test]
	fn series_id_serde_validates() {
		let id: SeriesId =
			serde_json::from_str("\"abc123\"").expect("Valid identifier should deserialize.");

		assert_eq!(id.as_ref(), "abc123");
		assert!(serde_json::from_str::<SeriesId>("\"a b\"").is_err());
	}
}
