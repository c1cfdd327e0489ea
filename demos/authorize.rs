//! Walks through the three-legged handshake and prints the config to persist afterwards.
//!
//! Reads `TIMETRIC_CONSUMER_KEY` and `TIMETRIC_CONSUMER_SECRET` from the environment.

// std
use std::{env, io};
// crates.io
use color_eyre::Result;
// self
use timetric::{client::Client, config::ClientConfig};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::from_pairs([
		("consumer_key", env::var("TIMETRIC_CONSUMER_KEY")?),
		("consumer_secret", env::var("TIMETRIC_CONSUMER_SECRET")?),
	]);
	let client = Client::new(config)?;
	let session = client.start_authorization(None)?;

	println!("Authorize this application at {}.", session.authorize_url);
	println!("Paste the verifier (leave empty if none was shown), then press enter:");

	let mut verifier = String::new();

	io::stdin().read_line(&mut verifier)?;

	let verifier = verifier.trim();
	let verifier = (!verifier.is_empty()).then_some(verifier);
	let token = client.access_token(&session.request_token, verifier)?;

	println!("Authorized with access token {}.", token.key);
	println!("Persist these settings:");

	for (key, value) in client.config().to_pairs() {
		println!("  {key} = {value}");
	}

	Ok(())
}
