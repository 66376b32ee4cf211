//! Scope → claims mapping.
//!
//! Requested scopes decide which claim groups a userinfo object carries. The mapping exists
//! twice: statically, where a [`ScopeList`] tuple such as `(OpenId, Email, Profile)` picks
//! the group structs returned by
//! [`ProviderClient::resolve_user_as`](crate::flows::ProviderClient::resolve_user_as), and
//! at runtime, where [`ClaimFieldSet::derive`] works on plain scope strings.
//!
//! The provider is not asked to prove anything: the typed groups only check the fields they
//! read, and [`UserClaims::raw`] keeps the object exactly as received.

pub mod groups;
pub mod phone;
pub mod schema;
pub mod scope;

pub use groups::*;
pub use phone::*;
pub use schema::*;
pub use scope::*;

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Claims resolved for a [`ScopeList`], plus the untouched userinfo object.
pub struct UserClaims<L>
where
	L: ScopeList,
{
	claims: L::Claims,
	raw: Map<String, Value>,
}
impl<L> UserClaims<L>
where
	L: ScopeList,
{
	/// Reads the typed groups for `L` out of a userinfo object.
	pub fn from_map(raw: Map<String, Value>) -> Result<Self, ClaimsDeError> {
		let claims = L::claims_from_map(&raw)?;

		Ok(Self { claims, raw })
	}

	/// Typed claim groups, in scope-list order.
	pub fn claims(&self) -> &L::Claims {
		&self.claims
	}

	/// Userinfo object exactly as the provider returned it.
	pub fn raw(&self) -> &Map<String, Value> {
		&self.raw
	}

	/// Looks up any member of the raw object, including provider-specific ones.
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.raw.get(field)
	}

	/// Splits into the typed groups and the raw object.
	pub fn into_parts(self) -> (L::Claims, Map<String, Value>) {
		(self.claims, self.raw)
	}
}
impl<L> Deref for UserClaims<L>
where
	L: ScopeList,
{
	type Target = L::Claims;

	fn deref(&self) -> &Self::Target {
		&self.claims
	}
}
impl<L> Clone for UserClaims<L>
where
	L: ScopeList,
{
	fn clone(&self) -> Self {
		Self { claims: self.claims.clone(), raw: self.raw.clone() }
	}
}
impl<L> Debug for UserClaims<L>
where
	L: ScopeList,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserClaims").field("claims", &self.claims).finish_non_exhaustive()
	}
}
