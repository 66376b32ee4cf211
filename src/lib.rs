//! Typed OAuth 2.0 authorization-code + OpenID Connect client for authentik. Build the
//! authorize redirect, trade the returned code for an access token, and resolve that token to
//! user claims whose shape follows the scopes you asked for.
//!
//! ```no_run
//! # async fn run() -> authentik_oath::error::Result<()> {
//! use authentik_oath::{
//! 	claims::{Email, OpenId, Profile},
//! 	flows::ProviderClient,
//! 	provider::Credentials,
//! };
//!
//! let client = ProviderClient::new("https://authentik.example", Credentials {
//! 	id: "client-id".into(),
//! 	secret: "client-secret".into(),
//! 	redirect: "https://app.example/callback".into(),
//! })?;
//! let redirect_to = client.authorization_url::<(OpenId, Email, Profile)>("opaque-state");
//!
//! // ...the user comes back with `?code=...&state=opaque-state`...
//! let user = client.resolve_user_as::<(OpenId, Email, Profile)>("returned-code").await?;
//! let (openid, email, profile) = &*user;
//!
//! println!("{redirect_to} -> {} {:?} {:?}", openid.sub, email.email, profile.name);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod claims;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
