//! Client-level error types shared across configuration, claims, and flows.

// self
use crate::{_prelude::*, flows::ExchangeStage};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// [`Error::Protocol`] means the provider was reached but answered outside the contract,
/// while [`Error::Transport`] means the request never produced a usable response. Callers
/// should treat either as "authentication could not complete" and restart from the
/// authorization URL.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Provider responded with something the client cannot accept.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Exchange stage that failed; `None` for configuration errors raised before any request.
	pub fn stage(&self) -> Option<ExchangeStage> {
		match self {
			Self::Config(_) => None,
			Self::Protocol(e) => Some(e.stage()),
			Self::Transport(e) => Some(e.stage()),
		}
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required configuration value was empty.
	#[error("The {field} configuration value cannot be empty.")]
	Empty {
		/// Name of the missing value.
		field: &'static str,
	},
	/// Provider endpoint cannot be parsed.
	#[error("Provider endpoint is not a valid URL.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Provider endpoint parses but cannot be used as a base for the OAuth paths.
	#[error("Provider endpoint `{url}` must be an http or https URL.")]
	UnsupportedEndpoint {
		/// Endpoint that failed validation.
		url: String,
	},
	/// Redirect URI cannot be parsed.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Provider answered, but the answer violates the token or userinfo contract.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// Response did not declare a JSON content type.
	#[error("The {stage} endpoint returned a non-JSON response, got {body}")]
	NotJson {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// Declared `Content-Type`, if any.
		content_type: Option<String>,
		/// Raw response body.
		body: String,
	},
	/// Response declared JSON but the body could not be parsed.
	#[error("The {stage} endpoint returned malformed JSON, got {body}")]
	MalformedJson {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// Raw response body.
		body: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Response body was empty.
	#[error("The {stage} endpoint returned an empty body.")]
	EmptyBody {
		/// Stage that received the response.
		stage: ExchangeStage,
	},
	/// Userinfo (or token) JSON was not an object.
	#[error("The {stage} endpoint returned JSON that is not an object, got {body}")]
	NotAnObject {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// Raw response body.
		body: String,
	},
	/// Token response lacked a non-empty `access_token`.
	#[error("Missing access_token in token response, got {body}")]
	MissingAccessToken {
		/// Raw response body.
		body: String,
	},
	/// Provider returned an OAuth error object.
	#[error("The {stage} endpoint rejected the request with {error}{}.", fmt_description(.description))]
	ProviderRejected {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// HTTP status code.
		status: u16,
		/// OAuth `error` code.
		error: String,
		/// OAuth `error_description`, when supplied.
		description: Option<String>,
	},
	/// Provider returned a non-success status without an OAuth error object.
	#[error("The {stage} endpoint returned HTTP {status}, got {body}")]
	UnexpectedStatus {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Userinfo object does not fit the requested claim shape.
	#[error("User claims do not match the requested scopes.")]
	ClaimsShape {
		/// Deserialization failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ProtocolError {
	/// Exchange stage the error was raised in.
	pub fn stage(&self) -> ExchangeStage {
		match self {
			Self::NotJson { stage, .. }
			| Self::MalformedJson { stage, .. }
			| Self::EmptyBody { stage }
			| Self::NotAnObject { stage, .. }
			| Self::ProviderRejected { stage, .. }
			| Self::UnexpectedStatus { stage, .. } => *stage,
			Self::MissingAccessToken { .. } => ExchangeStage::Token,
			Self::ClaimsShape { .. } => ExchangeStage::Userinfo,
		}
	}
}

/// Transport-level failures (network, IO).
///
/// The transport's own error is kept untouched as the [`source`](StdError::source).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {stage} endpoint.")]
	Network {
		/// Stage being dispatched.
		stage: ExchangeStage,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the {stage} endpoint.")]
	Io {
		/// Stage being dispatched.
		stage: ExchangeStage,
		/// IO failure.
		#[source]
		source: std::io::Error,
	},
	/// Transport failed without a typed error.
	#[error("HTTP client error occurred while calling the {stage} endpoint: {message}.")]
	Other {
		/// Stage being dispatched.
		stage: ExchangeStage,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Exchange stage whose request failed in flight.
	pub fn stage(&self) -> ExchangeStage {
		match self {
			Self::Network { stage, .. } | Self::Io { stage, .. } | Self::Other { stage, .. } =>
				*stage,
		}
	}
}

fn fmt_description(description: &Option<String>) -> String {
	description.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}
