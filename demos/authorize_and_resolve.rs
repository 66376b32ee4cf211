//! Prints the authorize URL for an authentik application and, when a code is passed on the
//! command line, resolves it into typed claims.
//!
//! ```sh
//! AUTHENTIK_ENDPOINT=https://authentik.example \
//! AUTHENTIK_CLIENT_ID=... AUTHENTIK_CLIENT_SECRET=... \
//! AUTHENTIK_REDIRECT=https://app.example/callback \
//! cargo run --example authorize_and_resolve -- <code>
//! ```

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::WrapErr};
// self
use authentik_oath::{
	claims::{Email, OpenId, Profile},
	flows::ProviderClient,
	provider::Credentials,
};

type Scopes = (OpenId, Email, Profile);

fn var(name: &str) -> Result<String> {
	env::var(name).wrap_err_with(|| format!("{name} must be set"))
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let client = ProviderClient::new(var("AUTHENTIK_ENDPOINT")?, Credentials {
		id: var("AUTHENTIK_CLIENT_ID")?,
		secret: var("AUTHENTIK_CLIENT_SECRET")?,
		redirect: var("AUTHENTIK_REDIRECT")?,
	})?;
	// Use a fresh random value per login and compare it on the callback.
	let state = "demo-state";

	println!("Send your user to {}.", client.authorization_url::<Scopes>(state));

	let Some(code) = env::args().nth(1) else {
		println!("Re-run with the `code` query parameter from the callback to resolve the user.");

		return Ok(());
	};
	let user = client.resolve_user_as::<Scopes>(&code).await?;
	let (openid, email, profile) = &*user;

	println!("Subject: {}.", openid.sub);
	println!("Verified email: {:?}.", email.verified_email());
	println!("Name: {:?}, groups: {:?}.", profile.name, profile.groups);

	Ok(())
}
