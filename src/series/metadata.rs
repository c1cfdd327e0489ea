//! Metadata submitted when creating a series.

// self
use crate::{_prelude::*, error::ConfigError};

/// Descriptive fields sent as multipart form fields on creation.
///
/// `caption` and `title` are mandatory; any additional fields are forwarded verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
	/// Short caption shown alongside the series.
	pub caption: String,
	/// Human-readable title.
	pub title: String,
	/// Extra form fields.
	#[serde(flatten)]
	pub fields: BTreeMap<String, String>,
}
impl SeriesMetadata {
	/// Creates metadata from the two required fields.
	pub fn new(caption: impl Into<String>, title: impl Into<String>) -> Self {
		Self { caption: caption.into(), title: title.into(), fields: BTreeMap::new() }
	}

	/// Starts a builder.
	pub fn builder() -> SeriesMetadataBuilder {
		SeriesMetadataBuilder::default()
	}

	/// Adds an extra form field.
	pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.insert(name.into(), value.into());

		self
	}

	/// Ensures the required fields are non-empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.caption.trim().is_empty() {
			return Err(ConfigError::MissingMetadata { field: "caption" });
		}
		if self.title.trim().is_empty() {
			return Err(ConfigError::MissingMetadata { field: "title" });
		}

		Ok(())
	}

	/// Form fields in submission order: `caption`, `title`, then extras by name.
	pub fn form_fields(&self) -> Vec<(String, String)> {
		let mut fields = vec![
			("caption".to_owned(), self.caption.clone()),
			("title".to_owned(), self.title.clone()),
		];

		fields.extend(
			self.fields
				.iter()
				.filter(|(name, _)| !matches!(name.as_str(), "caption" | "title"))
				.map(|(name, value)| (name.clone(), value.clone())),
		);

		fields
	}
}

/// Builder for [`SeriesMetadata`].
#[derive(Clone, Debug, Default)]
pub struct SeriesMetadataBuilder {
	caption: Option<String>,
	title: Option<String>,
	fields: BTreeMap<String, String>,
}
impl SeriesMetadataBuilder {
	/// Sets the caption.
	pub fn caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = Some(caption.into());

		self
	}

	/// Sets the title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Adds an extra form field.
	pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.insert(name.into(), value.into());

		self
	}

	/// Validates and returns the metadata.
	pub fn build(self) -> Result<SeriesMetadata, ConfigError> {
		let caption = self.caption.ok_or(ConfigError::MissingMetadata { field: "caption" })?;
		let title = self.title.ok_or(ConfigError::MissingMetadata { field: "title" })?;
		let metadata = SeriesMetadata { caption, title, fields: self.fields };

		metadata.validate()?;

		Ok(metadata)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_requires_caption_and_title() {
		let err = SeriesMetadata::builder().title("Power").build().expect_err("Caption is required.");

		assert!(matches!(err, ConfigError::MissingMetadata { field: "caption" }));

		let err = SeriesMetadata::builder()
			.caption("kW")
			.title("  ")
			.build()
			.expect_err("Blank title is rejected.");

		assert!(matches!(err, ConfigError::MissingMetadata { field: "title" }));
	}

	#[test]
	fn form_fields_lead_with_required_fields() {
		let metadata = SeriesMetadata::builder()
			.field("units", "kW")
			.field("caption", "shadowed")
			.caption("Meter")
			.title("Power")
			.build()
			.expect("Metadata should build.");

		assert_eq!(
			metadata.form_fields(),
			vec![
				("caption".to_owned(), "Meter".to_owned()),
				("title".to_owned(), "Power".to_owned()),
				("units".to_owned(), "kW".to_owned()),
			]
		);
	}
}
