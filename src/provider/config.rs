// crates.io
use oauth2::{ClientId, ClientSecret, RedirectUrl};
// self
use crate::{_prelude::*, error::ConfigError, provider::ProviderEndpoints};

/// Application credentials issued by the provider.
///
/// Deserializable so it can sit in an application config file, but never serialized and
/// never printed with its secret.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Credentials {
	/// OAuth client identifier.
	pub id: String,
	/// OAuth client secret.
	pub secret: String,
	/// Where the provider sends users after they authenticate.
	pub redirect: String,
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("id", &self.id)
			.field("secret", &"<redacted>")
			.field("redirect", &self.redirect)
			.finish()
	}
}

/// Validated, immutable configuration owned by a single client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Provider base URL as configured.
	pub endpoint: Url,
	/// Endpoints derived from [`endpoint`](Self::endpoint).
	pub endpoints: ProviderEndpoints,
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// Redirect URI sent with both the authorize URL and the token exchange.
	pub redirect_uri: RedirectUrl,
	client_secret: ClientSecret,
}
impl ClientConfig {
	/// Validates `endpoint` plus `credentials` into a configuration.
	pub fn new(endpoint: impl AsRef<str>, credentials: Credentials) -> Result<Self, ConfigError> {
		let Credentials { id, secret, redirect } = credentials;

		Self::builder(endpoint.as_ref())
			.client_id(id)
			.client_secret(secret)
			.redirect_uri(redirect)
			.build()
	}

	/// Creates a builder seeded with the provider base URL.
	pub fn builder(endpoint: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(endpoint)
	}

	/// Client secret; callers must avoid logging it.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Default)]
pub struct ClientConfigBuilder {
	endpoint: String,
	client_id: String,
	client_secret: String,
	redirect_uri: String,
}
impl ClientConfigBuilder {
	/// Creates a new builder seeded with the provider base URL.
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self { endpoint: endpoint.into(), ..Default::default() }
	}

	/// Sets the OAuth client identifier.
	pub fn client_id(mut self, id: impl Into<String>) -> Self {
		self.client_id = id.into();

		self
	}

	/// Sets the OAuth client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = secret.into();

		self
	}

	/// Sets the redirect URI.
	pub fn redirect_uri(mut self, redirect: impl Into<String>) -> Self {
		self.redirect_uri = redirect.into();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let endpoint = parse_endpoint(&self.endpoint)?;
		let client_id = non_empty("client id", self.client_id)?;
		let client_secret = non_empty("client secret", self.client_secret)?;
		let redirect = non_empty("redirect URI", self.redirect_uri)?;
		let redirect_uri =
			RedirectUrl::new(redirect).map_err(|source| ConfigError::InvalidRedirect { source })?;
		let endpoints = ProviderEndpoints::from_base(&endpoint)?;

		Ok(ClientConfig {
			endpoint,
			endpoints,
			client_id: ClientId::new(client_id),
			redirect_uri,
			client_secret: ClientSecret::new(client_secret),
		})
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("endpoint", &self.endpoint)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &!self.client_secret.is_empty())
			.field("redirect_uri", &self.redirect_uri)
			.finish()
	}
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
	if raw.trim().is_empty() {
		return Err(ConfigError::Empty { field: "endpoint" });
	}

	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidEndpoint { source })?;

	if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
		return Err(ConfigError::UnsupportedEndpoint { url: url.to_string() });
	}

	Ok(url)
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
	if value.trim().is_empty() { Err(ConfigError::Empty { field }) } else { Ok(value) }
}
