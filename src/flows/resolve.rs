//! Code → access token → userinfo resolution.
//!
//! Two sequential form POSTs, each authenticated with the client's Basic credentials. The
//! access token never leaves this module unless the caller asks for it via
//! [`ProviderClient::exchange_code`]; nothing is cached or refreshed.

// crates.io
use oauth2::AccessToken;
// self
use crate::{
	_prelude::*,
	claims::{DefaultScopes, ScopeList, UserClaims},
	error::ProtocolError,
	flows::{ExchangeStage, ProviderClient, common},
	http::{self, ProviderHttpClient},
	obs::FlowKind,
};

impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Resolves `code` into the claims granted by [`DefaultScopes`].
	pub async fn resolve_user(&self, code: &str) -> Result<UserClaims<DefaultScopes>> {
		self.resolve_user_as::<DefaultScopes>(code).await
	}

	/// Resolves `code` into claims shaped by the scope list `L`.
	///
	/// Fields the provider omits become `None`; a field present with the wrong JSON type fails
	/// with [`ProtocolError::ClaimsShape`] naming its path.
	pub async fn resolve_user_as<L>(&self, code: &str) -> Result<UserClaims<L>>
	where
		L: ScopeList,
	{
		common::observe(FlowKind::UserResolution, "resolve_user", async move {
			let raw = self.exchange_and_fetch(code).await?;
			let claims = UserClaims::from_map(raw)
				.map_err(|source| ProtocolError::ClaimsShape { source })?;

			Ok(claims)
		})
		.await
	}

	/// Resolves `code` into the userinfo object exactly as the provider returned it.
	pub async fn resolve_user_raw(&self, code: &str) -> Result<Map<String, Value>> {
		common::observe(FlowKind::UserResolution, "resolve_user_raw", self.exchange_and_fetch(code))
			.await
	}

	/// Trades an authorization code for an access token.
	///
	/// Sends `code`, `grant_type=authorization_code`, and the configured `redirect_uri`. Any
	/// other field of the token response is ignored.
	pub async fn exchange_code(&self, code: &str) -> Result<AccessToken> {
		const STAGE: ExchangeStage = ExchangeStage::Token;

		common::observe(FlowKind::TokenExchange, STAGE.as_str(), async move {
			let config = self.config();
			let request = common::form_post(config, &config.endpoints.token, &[
				("code", code),
				("grant_type", "authorization_code"),
				("redirect_uri", config.redirect_uri.as_str()),
			])?;
			let response = http::dispatch(self.http_client.as_ref(), STAGE, request).await?;
			let json = common::read_json(STAGE, response)?;
			let access_token = json
				.object
				.get("access_token")
				.and_then(Value::as_str)
				.filter(|token| !token.is_empty())
				.ok_or_else(|| ProtocolError::MissingAccessToken { body: json.body.clone() })?;

			Ok(AccessToken::new(access_token.to_owned()))
		})
		.await
	}

	/// Fetches the userinfo object for `access_token`.
	///
	/// The token travels in the form body next to the Basic credentials, which is what
	/// authentik's userinfo endpoint accepts.
	pub async fn fetch_userinfo(&self, access_token: &AccessToken) -> Result<Map<String, Value>> {
		const STAGE: ExchangeStage = ExchangeStage::Userinfo;

		common::observe(FlowKind::Userinfo, STAGE.as_str(), async move {
			let config = self.config();
			let request = common::form_post(config, &config.endpoints.userinfo, &[(
				"access_token",
				access_token.secret().as_str(),
			)])?;
			let response = http::dispatch(self.http_client.as_ref(), STAGE, request).await?;

			Ok(common::read_json(STAGE, response)?.object)
		})
		.await
	}

	async fn exchange_and_fetch(&self, code: &str) -> Result<Map<String, Value>> {
		let access_token = self.exchange_code(code).await?;

		self.fetch_userinfo(&access_token).await
	}
}
