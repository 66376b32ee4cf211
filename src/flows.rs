//! The provider client and its flows.
//!
//! [`ProviderClient`] owns an immutable [`ClientConfig`] and a shared transport, nothing else,
//! so one instance can serve any number of concurrent callers. A resolution walks
//! `Idle -> ExchangingToken -> FetchingUserinfo -> Done`; the first failing step ends it and
//! the returned error names that step through [`ExchangeStage`].

pub mod authorize;
pub mod resolve;

mod common;

// self
use crate::{_prelude::*, http::ProviderHttpClient, provider::ClientConfig};
#[cfg(feature = "reqwest")] use crate::{http::ReqwestHttpClient, provider::Credentials};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestProviderClient = ProviderClient<ReqwestHttpClient>;

/// Network step of a user resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStage {
	/// Authorization code → access token.
	Token,
	/// Access token → userinfo object.
	Userinfo,
}
impl ExchangeStage {
	/// Returns a stable label suitable for errors, spans, and metrics.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::Token => "token",
			ExchangeStage::Userinfo => "userinfo",
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// OAuth 2.0 + OIDC client for a single provider deployment.
pub struct ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	config: Arc<ClientConfig>,
}
impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: Arc::new(config) }
	}

	/// Validated configuration this client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}
}
#[cfg(feature = "reqwest")]
impl ProviderClient<ReqwestHttpClient> {
	/// Validates the configuration and provisions a reqwest transport.
	///
	/// Fails with [`ConfigError`](crate::error::ConfigError) when any value is empty or
	/// `endpoint` is not an `http`/`https` URL; nothing is deferred to the first request.
	pub fn new(endpoint: impl AsRef<str>, credentials: Credentials) -> Result<Self> {
		Self::from_config(ClientConfig::new(endpoint, credentials)?)
	}

	/// Provisions a reqwest transport for an already validated configuration.
	pub fn from_config(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self { http_client: self.http_client.clone(), config: self.config.clone() }
	}
}
impl<C> Debug for ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderClient")
			.field("endpoint", &self.config.endpoint.as_str())
			.field("client_id", &self.config.client_id.as_str())
			.field("redirect_uri", &self.config.redirect_uri.as_str())
			.field("client_secret_set", &!self.config.client_secret().secret().is_empty())
			.finish()
	}
}
