//! Phone claims, where a verified number must be syntactically valid.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

/// Errors emitted when validating phone claims.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum PhoneNumberError {
	/// Number does not start with `+`.
	#[error("Phone number must start with `+`: {number}.")]
	MissingPlus {
		/// The offending number.
		number: String,
	},
	/// Subscriber or extension part is not a non-empty run of ASCII digits.
	#[error("Phone number must match `+digits[;ext=digits]`: {number}.")]
	Malformed {
		/// The offending number.
		number: String,
	},
	/// `phone_number_verified` is true but no number was supplied.
	#[error("Verified phone claims must carry a phone number.")]
	MissingVerifiedNumber,
}

/// Phone number in `+digits[;ext=digits]` form, e.g. `+14155550100;ext=42`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);
impl PhoneNumber {
	/// Validates and wraps a phone number.
	pub fn new(value: impl Into<String>) -> Result<Self, PhoneNumberError> {
		let number = value.into();

		validate(&number)?;

		Ok(Self(number))
	}

	/// Digits before any extension, without the leading `+`.
	pub fn subscriber(&self) -> &str {
		let rest = &self.0[1..];

		rest.split_once(EXTENSION_MARKER).map_or(rest, |(digits, _)| digits)
	}

	/// Extension digits, if any.
	pub fn extension(&self) -> Option<&str> {
		self.0.split_once(EXTENSION_MARKER).map(|(_, ext)| ext)
	}
}
impl Deref for PhoneNumber {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for PhoneNumber {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<PhoneNumber> for String {
	fn from(value: PhoneNumber) -> Self {
		value.0
	}
}
impl TryFrom<String> for PhoneNumber {
	type Error = PhoneNumberError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl FromStr for PhoneNumber {
	type Err = PhoneNumberError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for PhoneNumber {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "PhoneNumber({})", self.0)
	}
}
impl Display for PhoneNumber {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

/// Claims unlocked by the `phone` scope.
///
/// Unverified numbers are passed through as-is; a verified number is only accepted when it
/// parses as a [`PhoneNumber`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPhoneClaims", into = "RawPhoneClaims")]
pub enum PhoneClaims {
	/// `phone_number_verified` is false or absent.
	Unverified {
		/// Unconstrained number, if present.
		phone_number: Option<String>,
	},
	/// `phone_number_verified` is true.
	Verified {
		/// Validated number.
		phone_number: PhoneNumber,
	},
}
impl PhoneClaims {
	/// Builds verified claims, validating the number.
	pub fn verified(number: impl Into<String>) -> Result<Self, PhoneNumberError> {
		Ok(Self::Verified { phone_number: PhoneNumber::new(number)? })
	}

	/// Returns true when the provider verified the number.
	pub fn is_verified(&self) -> bool {
		matches!(self, Self::Verified { .. })
	}

	/// The number, verified or not.
	pub fn phone_number(&self) -> Option<&str> {
		match self {
			Self::Unverified { phone_number } => phone_number.as_deref(),
			Self::Verified { phone_number } => Some(phone_number.as_ref()),
		}
	}
}
impl Default for PhoneClaims {
	fn default() -> Self {
		Self::Unverified { phone_number: None }
	}
}
impl TryFrom<RawPhoneClaims> for PhoneClaims {
	type Error = PhoneNumberError;

	fn try_from(raw: RawPhoneClaims) -> Result<Self, Self::Error> {
		if raw.phone_number_verified == Some(true) {
			let number = raw.phone_number.ok_or(PhoneNumberError::MissingVerifiedNumber)?;

			Self::verified(number)
		} else {
			Ok(Self::Unverified { phone_number: raw.phone_number })
		}
	}
}

#[derive(Serialize, Deserialize)]
struct RawPhoneClaims {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	phone_number: Option<String>,
	#[serde(default)]
	phone_number_verified: Option<bool>,
}
impl From<PhoneClaims> for RawPhoneClaims {
	fn from(claims: PhoneClaims) -> Self {
		match claims {
			PhoneClaims::Unverified { phone_number } =>
				Self { phone_number, phone_number_verified: Some(false) },
			PhoneClaims::Verified { phone_number } =>
				Self { phone_number: Some(phone_number.into()), phone_number_verified: Some(true) },
		}
	}
}

const EXTENSION_MARKER: &str = ";ext=";

fn validate(number: &str) -> Result<(), PhoneNumberError> {
	let Some(rest) = number.strip_prefix('+') else {
		return Err(PhoneNumberError::MissingPlus { number: number.to_owned() });
	};
	let (digits, extension) = match rest.split_once(EXTENSION_MARKER) {
		Some((digits, extension)) => (digits, Some(extension)),
		None => (rest, None),
	};

	if !is_digits(digits) || extension.is_some_and(|ext| !is_digits(ext)) {
		return Err(PhoneNumberError::Malformed { number: number.to_owned() });
	}

	Ok(())
}

fn is_digits(value: &str) -> bool {
	!value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
