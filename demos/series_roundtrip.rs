//! Creates a series, writes to it in every supported way, and reads it back.
//!
//! Expects a persisted access token in `TIMETRIC_OAUTH_TOKEN`/`TIMETRIC_OAUTH_SECRET` next
//! to the consumer credentials (see the `authorize` demo).

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use timetric::{
	client::Client,
	config::ClientConfig,
	data::SeriesData,
	series::SeriesMetadata,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::from_pairs(
		[
			("consumer_key", "TIMETRIC_CONSUMER_KEY"),
			("consumer_secret", "TIMETRIC_CONSUMER_SECRET"),
			("oauth_token", "TIMETRIC_OAUTH_TOKEN"),
			("oauth_secret", "TIMETRIC_OAUTH_SECRET"),
		]
		.into_iter()
		.map(|(key, var)| env::var(var).map(|value| (key, value)))
		.collect::<Result<Vec<_>, _>>()?,
	);
	let client = Client::new(config)?;
	let metadata = SeriesMetadata::builder().caption("Demo").title("Round trip").build()?;
	let series = client.create_series(
		metadata,
		Some(SeriesData::points([("2009-03-11 01:30:00", 1.0), ("2009-03-11 01:31:00", 2.0)])),
	)?;

	println!("Created {series} at {}.", series.url());

	series.update(3.5)?;
	series.increment(-0.5)?;
	println!("Latest value: {}.", series.as_float()?);

	series.rewrite(SeriesData::from_csv("1236735000,10\n1236735060,20\n"))?;

	for point in series.rows()? {
		let point = point?;

		println!("{} => {}", point.timestamp, point.value);
	}

	series.delete()?;
	println!("Emptied {series}.");

	Ok(())
}
