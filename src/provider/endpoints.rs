// self
use crate::{_prelude::*, error::ConfigError};

/// Path of the browser-facing authorization endpoint.
pub const AUTHORIZE_PATH: &str = "/application/o/authorize/";
/// Path of the token endpoint.
pub const TOKEN_PATH: &str = "/application/o/token/";
/// Path of the userinfo endpoint.
pub const USERINFO_PATH: &str = "/application/o/userinfo/";

/// Endpoint set resolved against the provider base URL.
///
/// The OAuth paths are absolute, so any path on the base URL is replaced rather than
/// extended: `https://auth.example/if/flow/` still yields
/// `https://auth.example/application/o/token/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization endpoint the end user is redirected to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// Userinfo endpoint used to resolve claims.
	pub userinfo: Url,
}
impl ProviderEndpoints {
	/// Resolves every endpoint against `base`.
	pub fn from_base(base: &Url) -> Result<Self, ConfigError> {
		let join = |path: &str| {
			base.join(path).map_err(|source| ConfigError::InvalidEndpoint { source })
		};

		Ok(Self {
			authorization: join(AUTHORIZE_PATH)?,
			token: join(TOKEN_PATH)?,
			userinfo: join(USERINFO_PATH)?,
		})
	}
}
