//! Claim field groups, one struct per standard scope.

// crates.io
use time::OffsetDateTime;
// self
use crate::_prelude::*;

/// Claims always present once `openid` is granted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenIdClaims {
	/// Subject identifier, stable per user and client.
	pub sub: String,
}

/// Claims unlocked by the `profile` scope. Providers may omit any of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileClaims {
	/// Full display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Given (first) name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Family (last) name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	/// Middle name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub middle_name: Option<String>,
	/// Casual name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nickname: Option<String>,
	/// Username the user prefers to be addressed by.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_username: Option<String>,
	/// Profile page URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub profile: Option<String>,
	/// Profile picture URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
	/// Web page or blog URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub website: Option<String>,
	/// Free-form gender.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// `YYYY` or `YYYY-MM-DD`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub birthdate: Option<String>,
	/// IANA time zone, e.g. `Europe/Paris`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub zoneinfo: Option<String>,
	/// BCP 47 locale, e.g. `en-US`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	/// Last profile update, sent as unix seconds.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::timestamp::option"
	)]
	pub updated_at: Option<OffsetDateTime>,
	/// authentik group names the user belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub groups: Option<Vec<String>>,
}

/// Claims unlocked by the `email` scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailClaims {
	/// `local@domain` address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Whether the provider verified the address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email_verified: Option<bool>,
}
impl EmailClaims {
	/// Address, only when the provider marked it verified.
	pub fn verified_email(&self) -> Option<&str> {
		match self.email_verified {
			Some(true) => self.email.as_deref(),
			_ => None,
		}
	}
}

/// Claims unlocked by the `address` scope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressClaims {
	/// Postal address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<AddressClaim>,
}

/// Structured postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressClaim {
	/// Full mailing address, possibly multi-line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub formatted: Option<String>,
	/// Street address component.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub street_address: Option<String>,
	/// City or locality.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locality: Option<String>,
	/// State, province, or region.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub region: Option<String>,
	/// Zip or postal code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<String>,
	/// Country name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
}

/// Claims of a scope that unlocks no standard fields.
///
/// Deserializes from any object, so provider-specific scopes never fail a resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoClaims {}
