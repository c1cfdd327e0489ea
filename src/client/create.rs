//! Series creation.

// self
use crate::{
	_prelude::*,
	client::{ApiRequest, Client},
	data::SeriesData,
	error::ConfigError,
	http::{HttpResponse, HttpTransport},
	obs::Operation,
	series::{Series, SeriesId, SeriesMetadata},
};

impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a series from `metadata`, optionally seeded with `data`.
	///
	/// Metadata is validated before anything is sent. The service must answer `201 Created`
	/// with a `Location` pointing at the new series.
	pub fn create_series(
		&self,
		metadata: SeriesMetadata,
		data: Option<SeriesData>,
	) -> Result<Series<C>> {
		metadata.validate()?;

		let mut request = ApiRequest::post(self.endpoints.create.clone()).multipart();

		for (name, value) in metadata.form_fields() {
			request = request.param(name, value);
		}
		if let Some(data) = data {
			request = request.file("csv", data.into_csv_bytes()?);
		}

		let response = self.call(Operation::CreateSeries, request, 201)?;
		let id = self.series_id_from_location(&response)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(series = %id, "Created series.");

		Series::new(self.clone(), id)
	}

	fn series_id_from_location(&self, response: &HttpResponse) -> Result<SeriesId, ConfigError> {
		let location = response.header("Location").ok_or(ConfigError::MissingLocation)?;
		let invalid = || ConfigError::InvalidLocation { location: location.to_owned() };
		let url = self.endpoints.base.join(location).map_err(|_| invalid())?;
		let segments = url
			.path_segments()
			.map(|segments| segments.collect::<Vec<_>>())
			.unwrap_or_default();

		// `/series/{id}/` splits into [.., "series", id, ""].
		let id = segments.len().checked_sub(2).and_then(|i| segments.get(i)).ok_or_else(invalid)?;

		SeriesId::new(id).map_err(|_| invalid())
	}
}
