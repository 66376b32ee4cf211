//! Runtime view of the scope → claim field mapping.
//!
//! [`ClaimFieldSet::derive`] answers "which fields may the userinfo object carry for these
//! scopes" for scope lists only known at runtime. The typed API in [`super::scope`] reads the
//! same tables, so both views always agree.

// std
use std::collections::{BTreeMap, btree_map::Iter};
// self
use crate::_prelude::*;

/// Whether a claim field is guaranteed once its scope is granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
	/// Provider may omit the field.
	Optional,
	/// Field is always present.
	Required,
}

/// A single claim field contributed by a scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimField {
	/// JSON member name in the userinfo object.
	pub name: &'static str,
	/// Presence guarantee.
	pub presence: Presence,
}
impl ClaimField {
	const fn required(name: &'static str) -> Self {
		Self { name, presence: Presence::Required }
	}

	const fn optional(name: &'static str) -> Self {
		Self { name, presence: Presence::Optional }
	}
}

/// Fields unlocked by `openid`.
pub const OPENID_FIELDS: &[ClaimField] = &[ClaimField::required("sub")];
/// Fields unlocked by `profile`; `groups` is an authentik extension.
pub const PROFILE_FIELDS: &[ClaimField] = &[
	ClaimField::optional("name"),
	ClaimField::optional("given_name"),
	ClaimField::optional("family_name"),
	ClaimField::optional("middle_name"),
	ClaimField::optional("nickname"),
	ClaimField::optional("preferred_username"),
	ClaimField::optional("profile"),
	ClaimField::optional("picture"),
	ClaimField::optional("website"),
	ClaimField::optional("gender"),
	ClaimField::optional("birthdate"),
	ClaimField::optional("zoneinfo"),
	ClaimField::optional("locale"),
	ClaimField::optional("updated_at"),
	ClaimField::optional("groups"),
];
/// Fields unlocked by `email`.
pub const EMAIL_FIELDS: &[ClaimField] =
	&[ClaimField::optional("email"), ClaimField::optional("email_verified")];
/// Fields unlocked by `address`.
pub const ADDRESS_FIELDS: &[ClaimField] = &[ClaimField::optional("address")];
/// Fields unlocked by `phone`.
pub const PHONE_FIELDS: &[ClaimField] =
	&[ClaimField::optional("phone_number"), ClaimField::optional("phone_number_verified")];

/// Returns the claim fields a standard scope unlocks; unknown scopes unlock nothing.
pub fn scope_fields(scope: &str) -> &'static [ClaimField] {
	match scope {
		"openid" => OPENID_FIELDS,
		"profile" => PROFILE_FIELDS,
		"email" => EMAIL_FIELDS,
		"address" => ADDRESS_FIELDS,
		"phone" => PHONE_FIELDS,
		_ => &[],
	}
}

/// Union of claim fields offered for a list of scopes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimFieldSet {
	fields: BTreeMap<&'static str, Presence>,
}
impl ClaimFieldSet {
	/// Derives the field set for the provided scopes.
	///
	/// Order and duplicates do not matter. Scopes outside the standard set contribute no
	/// fields and are not an error.
	pub fn derive<I, S>(scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut set = Self::default();

		for scope in scopes {
			set.extend_fields(scope_fields(scope.as_ref()));
		}

		set
	}

	pub(crate) fn extend_fields(&mut self, fields: &[ClaimField]) {
		for field in fields {
			let presence = self.fields.entry(field.name).or_insert(field.presence);

			*presence = (*presence).max(field.presence);
		}
	}

	/// Returns true if the field may appear.
	pub fn contains(&self, field: &str) -> bool {
		self.fields.contains_key(field)
	}

	/// Presence guarantee for `field`, if offered at all.
	pub fn presence(&self, field: &str) -> Option<Presence> {
		self.fields.get(field).copied()
	}

	/// Returns true if the field is guaranteed present.
	pub fn is_required(&self, field: &str) -> bool {
		self.presence(field) == Some(Presence::Required)
	}

	/// Iterator over `(field, presence)` pairs in field-name order.
	pub fn iter(&self) -> Iter<'_, &'static str, Presence> {
		self.fields.iter()
	}

	/// Number of offered fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns true if no field is offered.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}
impl<S> FromIterator<S> for ClaimFieldSet
where
	S: AsRef<str>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = S>,
	{
		Self::derive(iter)
	}
}

/// Runtime form of the claims derivation; same as [`ClaimFieldSet::derive`].
pub fn derive_claims_type<I, S>(scopes: I) -> ClaimFieldSet
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	ClaimFieldSet::derive(scopes)
}
