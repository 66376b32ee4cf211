//! Transport primitives for the token and userinfo exchanges.
//!
//! The module exposes [`ProviderHttpClient`], the client's only dependency on an HTTP stack.
//! Requests and responses travel as [`oauth2`]'s `http`-crate aliases ([`HttpRequest`],
//! [`HttpResponse`]) so custom transports never see reqwest types.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	flows::ExchangeStage,
};

/// Abstraction over HTTP transports able to dispatch the provider requests.
///
/// Implementations must be `Send + Sync + 'static` so one transport can back many clients,
/// and the handles they return must own whatever state the request needs so the request
/// futures stay `Send` for the lifetime of the in-flight call.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle used for a single exchange stage.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for the given exchange stage.
	fn handle(&self, stage: ExchangeStage) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Token and userinfo endpoints answer directly, so a custom [`ReqwestClient`] should not
/// follow redirects; [`ReqwestHttpClient::new`] and [`ReqwestHttpClient::client_builder`]
/// configure that for you.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a reqwest client that never follows redirects.
	pub fn new() -> Result<Self, ConfigError> {
		let client = Self::client_builder().build()?;

		Ok(Self(client))
	}

	/// Starts a reqwest builder with redirects disabled, for callers that need extra settings
	/// (timeouts, proxies, custom roots) before wrapping it with [`Self::with_client`].
	pub fn client_builder() -> reqwest::ClientBuilder {
		ReqwestClient::builder().redirect(reqwest::redirect::Policy::none())
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self, _stage: ExchangeStage) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// [`AsyncHttpClient`] handle returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Dispatches `request` through a fresh handle for `stage`, mapping transport failures.
pub(crate) async fn dispatch<C>(
	http_client: &C,
	stage: ExchangeStage,
	request: HttpRequest,
) -> Result<HttpResponse>
where
	C: ?Sized + ProviderHttpClient,
{
	let handle = http_client.handle(stage);

	handle.call(request).await.map_err(|err| map_transport_error(stage, err))
}

fn map_transport_error<E>(stage: ExchangeStage, err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { stage, source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(source) => TransportError::Io { stage, source }.into(),
		HttpClientError::Other(message) => TransportError::Other { stage, message }.into(),
		_ => TransportError::Other { stage, message: "unknown transport failure".into() }.into(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug)]
	struct Refused;
	impl Display for Refused {
		fn fmt(&self, f: &mut Formatter) -> FmtResult {
			f.write_str("Connection refused.")
		}
	}
	impl StdError for Refused {}

	#[test]
	fn transport_errors_keep_their_source() {
		let err = map_transport_error(
			ExchangeStage::Userinfo,
			HttpClientError::Reqwest(Box::new(Refused)),
		);

		match &err {
			Error::Transport(TransportError::Network { stage, .. }) =>
				assert_eq!(*stage, ExchangeStage::Userinfo),
			other => panic!("Unexpected error variant: {other:?}."),
		}

		let source =
			StdError::source(&err).expect("Transport error should expose the underlying failure.");

		assert!(source.downcast_ref::<Refused>().is_some());
	}

	#[test]
	fn other_transport_errors_keep_their_message() {
		let err = map_transport_error::<Refused>(
			ExchangeStage::Token,
			HttpClientError::Other("socket closed".into()),
		);

		assert_eq!(
			err.to_string(),
			"HTTP client error occurred while calling the token endpoint: socket closed."
		);
	}
}
