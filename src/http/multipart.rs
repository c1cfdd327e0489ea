//! Fixed-boundary `multipart/form-data` encoder used for series uploads.

/// Boundary shared by every multipart body the client produces.
pub const BOUNDARY: &str = "tHiSiStHeBoUnDaRyStRiNg";
/// `Content-Type` header value matching [`BOUNDARY`].
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data; boundary=tHiSiStHeBoUnDaRyStRiNg";

const CRLF: &[u8] = b"\r\n";

/// Ordered set of form fields and file parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
	fields: Vec<(String, String)>,
	files: Vec<(String, Vec<u8>)>,
}
impl MultipartForm {
	/// Creates an empty form.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a plain form field.
	pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.fields.push((name.into(), value.into()));

		self
	}

	/// Appends a file part; its `filename` repeats the field name.
	pub fn file(mut self, name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
		self.files.push((name.into(), contents.into()));

		self
	}

	/// Encodes every field, then every file, then the closing boundary.
	pub fn encode(&self) -> Vec<u8> {
		let mut lines: Vec<Vec<u8>> = Vec::new();

		for (name, value) in &self.fields {
			lines.push(format!("--{BOUNDARY}").into_bytes());
			lines.push(format!("Content-Disposition: form-data; name=\"{name}\"").into_bytes());
			lines.push(Vec::new());
			lines.push(value.as_bytes().to_vec());
		}
		for (name, contents) in &self.files {
			lines.push(format!("--{BOUNDARY}").into_bytes());
			lines.push(
				format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{name}\"")
					.into_bytes(),
			);
			lines.push(b"Content-Type: application/octet-stream".to_vec());
			lines.push(Vec::new());
			lines.push(contents.clone());
		}

		lines.push(format!("--{BOUNDARY}--").into_bytes());
		lines.push(Vec::new());

		lines.join(CRLF)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn content_type_names_the_boundary() {
		assert!(MULTIPART_CONTENT_TYPE.ends_with(BOUNDARY));
	}

	#[test]
	fn encodes_fields_before_files() {
		let body = MultipartForm::new()
			.file("csv", b"1,2\n".to_vec())
			.field("title", "Power")
			.encode();
		let expected = "--tHiSiStHeBoUnDaRyStRiNg\r\n\
			Content-Disposition: form-data; name=\"title\"\r\n\
			\r\n\
			Power\r\n\
			--tHiSiStHeBoUnDaRyStRiNg\r\n\
			Content-Disposition: form-data; name=\"csv\"; filename=\"csv\"\r\n\
			Content-Type: application/octet-stream\r\n\
			\r\n\
			1,2\n\r\n\
			--tHiSiStHeBoUnDaRyStRiNg--\r\n";

		assert_eq!(String::from_utf8(body).expect("Multipart body should be UTF-8."), expected);
	}

	#[test]
	fn empty_form_is_just_the_closing_boundary() {
		assert_eq!(MultipartForm::new().encode(), b"--tHiSiStHeBoUnDaRyStRiNg--\r\n".to_vec());
	}
}
