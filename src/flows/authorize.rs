//! Authorization URL construction.
//!
//! Pure string work: no request is made and `state` is passed through untouched. Callers own
//! generating, persisting, and verifying it.

// self
use crate::{
	_prelude::*,
	claims::ScopeList,
	flows::ProviderClient,
	http::ProviderHttpClient,
	obs::{FlowKind, FlowSpan},
};

impl<C> ProviderClient<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the URL the end user's browser is sent to.
	///
	/// Query parameters are appended in a fixed order (`client_id`, `redirect_uri`,
	/// `response_type=code`, `scope`, `state`) and form-encoded, so the space separating
	/// scopes is written as `+`.
	pub fn build_authorization_url<I, S>(&self, scopes: I, state: &str) -> Url
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let _guard = FlowSpan::new(FlowKind::Authorization, "build_authorization_url").entered();
		let scope = scopes.into_iter().fold(String::new(), |mut acc, scope| {
			if !acc.is_empty() {
				acc.push(' ');
			}

			acc.push_str(scope.as_ref());

			acc
		});
		let config = self.config();
		let mut url = config.endpoints.authorization.clone();

		url.query_pairs_mut()
			.append_pair("client_id", config.client_id.as_str())
			.append_pair("redirect_uri", config.redirect_uri.as_str())
			.append_pair("response_type", "code")
			.append_pair("scope", &scope)
			.append_pair("state", state);

		url
	}

	/// Builds the authorization URL for a type-level scope list.
	///
	/// The same `L` passed to [`resolve_user_as`](Self::resolve_user_as) keeps the requested
	/// scopes and the decoded claims in lockstep.
	pub fn authorization_url<L>(&self, state: &str) -> Url
	where
		L: ScopeList,
	{
		self.build_authorization_url(L::names(), state)
	}
}
