//! Type-level scopes and scope lists.
//!
//! A [`Scope`] marker names the wire value and the claim group it unlocks. A [`ScopeList`] is
//! a tuple of markers; its [`Claims`](ScopeList::Claims) is the tuple of the matching groups,
//! so `(OpenId, Email)` resolves to `(OpenIdClaims, EmailClaims)` and nothing else.

// self
use crate::{
	_prelude::*,
	claims::{
		AddressClaims, ClaimField, ClaimFieldSet, EmailClaims, OpenIdClaims, PhoneClaims,
		ProfileClaims, schema,
	},
};

/// Deserialization failure for one claim group, with the JSON path that failed.
pub type ClaimsDeError = serde_path_to_error::Error<serde_json::Error>;

/// An OAuth scope known at compile time.
pub trait Scope {
	/// Wire value sent in the `scope` parameter.
	const NAME: &'static str;
	/// Fields the scope unlocks; empty for provider-specific scopes.
	const FIELDS: &'static [ClaimField];

	/// Claim group the scope unlocks.
	type Claims: 'static + Send + Sync + Clone + Debug + DeserializeOwned;
}

macro_rules! def_scope {
	($name:ident, $value:literal, $fields:expr, $claims:ty, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
		pub struct $name;
		impl Scope for $name {
			type Claims = $claims;

			const FIELDS: &'static [ClaimField] = $fields;
			const NAME: &'static str = $value;
		}
	};
}

def_scope! { OpenId, "openid", schema::OPENID_FIELDS, OpenIdClaims, "The `openid` scope." }
def_scope! { Profile, "profile", schema::PROFILE_FIELDS, ProfileClaims, "The `profile` scope." }
def_scope! { Email, "email", schema::EMAIL_FIELDS, EmailClaims, "The `email` scope." }
def_scope! { Address, "address", schema::ADDRESS_FIELDS, AddressClaims, "The `address` scope." }
def_scope! { Phone, "phone", schema::PHONE_FIELDS, PhoneClaims, "The `phone` scope." }

/// Declares a provider-specific scope that unlocks no standard claims.
///
/// ```
/// authentik_oath::custom_scope!(
/// 	/// authentik API access.
/// 	pub AuthentikApi, "goauthentik.io/api"
/// );
///
/// use authentik_oath::claims::{OpenId, ScopeList};
///
/// assert_eq!(<(OpenId, AuthentikApi)>::names(), ["openid", "goauthentik.io/api"]);
/// ```
#[macro_export]
macro_rules! custom_scope {
	($(#[$meta:meta])* $vis:vis $name:ident, $value:literal) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
		$vis struct $name;
		impl $crate::claims::Scope for $name {
			type Claims = $crate::claims::NoClaims;

			const FIELDS: &'static [$crate::claims::ClaimField] = &[];
			const NAME: &'static str = $value;
		}
	};
}

/// Ordered list of scopes, implemented for tuples of one to eight [`Scope`]s.
pub trait ScopeList {
	/// Tuple of the claim groups unlocked by each scope, in list order.
	type Claims: 'static + Send + Sync + Clone + Debug;

	/// Scope wire values in list order.
	fn names() -> Vec<&'static str>;

	/// Runtime view of the claim fields this list offers.
	fn field_set() -> ClaimFieldSet;

	/// Reads every claim group from the same userinfo object.
	fn claims_from_map(map: &Map<String, Value>) -> Result<Self::Claims, ClaimsDeError>;
}

macro_rules! impl_scope_list {
	($($scope:ident),+) => {
		impl<$($scope),+> ScopeList for ($($scope,)+)
		where
			$($scope: Scope),+
		{
			type Claims = ($($scope::Claims,)+);

			fn names() -> Vec<&'static str> {
				vec![$($scope::NAME),+]
			}

			fn field_set() -> ClaimFieldSet {
				let mut set = ClaimFieldSet::default();

				$(set.extend_fields($scope::FIELDS);)+

				set
			}

			fn claims_from_map(map: &Map<String, Value>) -> Result<Self::Claims, ClaimsDeError> {
				Ok(($(group::<$scope::Claims>(map)?,)+))
			}
		}
	};
}

impl_scope_list!(A);
impl_scope_list!(A, B);
impl_scope_list!(A, B, C);
impl_scope_list!(A, B, C, D);
impl_scope_list!(A, B, C, D, E);
impl_scope_list!(A, B, C, D, E, F);
impl_scope_list!(A, B, C, D, E, F, G);
impl_scope_list!(A, B, C, D, E, F, G, H);

/// Scopes requested when the caller does not pick any.
pub type DefaultScopes = (OpenId, Email, Profile);

fn group<T>(map: &Map<String, Value>) -> Result<T, ClaimsDeError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(Value::Object(map.clone()))
}
