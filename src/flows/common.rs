//! Shared helpers for the provider exchanges (request building, response checks, observation).

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{
	HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, ProtocolError},
	flows::ExchangeStage,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	provider::ClientConfig,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON object returned by the provider along with the raw text it was parsed from.
#[derive(Debug)]
pub(crate) struct JsonResponse {
	pub(crate) body: String,
	pub(crate) object: Map<String, Value>,
}

/// Builds a form-encoded POST authenticated with the client's Basic credentials.
pub(crate) fn form_post(
	config: &ClientConfig,
	url: &Url,
	params: &[(&str, &str)],
) -> Result<HttpRequest> {
	let body = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish();
	let request = Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(AUTHORIZATION, basic_authorization(config))
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(body.into_bytes())
		.map_err(ConfigError::from)?;

	Ok(request)
}

/// `Basic base64(client_id:client_secret)`, credentials taken verbatim.
pub(crate) fn basic_authorization(config: &ClientConfig) -> String {
	let pair = format!("{}:{}", config.client_id.as_str(), config.client_secret().secret());

	format!("Basic {}", STANDARD.encode(pair))
}

/// Checks a provider response and returns its JSON object.
///
/// The content type is checked before anything else so a non-JSON body is reported verbatim
/// instead of as a parse failure.
pub(crate) fn read_json(stage: ExchangeStage, response: HttpResponse) -> Result<JsonResponse> {
	let status = response.status();
	let content_type =
		response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).map(str::to_owned);
	let body = String::from_utf8_lossy(response.body()).into_owned();

	if !content_type.as_deref().is_some_and(is_json_media_type) {
		return Err(ProtocolError::NotJson { stage, content_type, body }.into());
	}
	if body.trim().is_empty() {
		return Err(ProtocolError::EmptyBody { stage }.into());
	}

	let value = serde_json::from_str::<Value>(&body)
		.map_err(|source| ProtocolError::MalformedJson { stage, body: body.clone(), source })?;

	if !status.is_success() {
		let status = status.as_u16();
		let rejection = value.get("error").and_then(Value::as_str).map(|error| {
			ProtocolError::ProviderRejected {
				stage,
				status,
				error: error.to_owned(),
				description: value
					.get("error_description")
					.and_then(Value::as_str)
					.map(str::to_owned),
			}
		});

		let err = rejection.unwrap_or(ProtocolError::UnexpectedStatus { stage, status, body });

		return Err(err.into());
	}

	match value {
		Value::Object(object) => Ok(JsonResponse { body, object }),
		_ => Err(ProtocolError::NotAnObject { stage, body }.into()),
	}
}

/// Wraps a flow future with its span and attempt/success/failure accounting.
pub(crate) async fn observe<T, F>(kind: FlowKind, stage: &'static str, flow: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	obs::record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(flow).await;

	match &result {
		Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
	}

	result
}

fn is_json_media_type(content_type: &str) -> bool {
	let essence = content_type.split(';').next().unwrap_or_default().trim();

	essence.eq_ignore_ascii_case(JSON_CONTENT_TYPE)
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::{error::Error, provider::Credentials};

	fn config() -> ClientConfig {
		ClientConfig::new("https://auth.example.com", Credentials {
			id: "client id".into(),
			secret: "s3cr3t:with-colon".into(),
			redirect: "https://app.example.com/callback".into(),
		})
		.expect("Configuration fixture should be valid.")
	}

	fn response(status: u16, content_type: Option<&str>, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Status fixture should be valid.");

		if let Some(content_type) = content_type {
			response.headers_mut().insert(
				CONTENT_TYPE,
				content_type.parse().expect("Content type fixture should be a valid header."),
			);
		}

		response
	}

	#[test]
	fn basic_authorization_encodes_raw_credentials() {
		assert_eq!(
			basic_authorization(&config()),
			format!("Basic {}", STANDARD.encode("client id:s3cr3t:with-colon"))
		);
	}

	#[test]
	fn form_post_encodes_the_body() {
		let config = config();
		let request = form_post(&config, &config.endpoints.token, &[
			("code", "a b&c"),
			("grant_type", "authorization_code"),
		])
		.expect("Request should build.");

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri().to_string(), "https://auth.example.com/application/o/token/");
		assert_eq!(request.headers()[CONTENT_TYPE], FORM_CONTENT_TYPE);
		assert_eq!(request.body().as_slice(), b"code=a+b%26c&grant_type=authorization_code");
	}

	#[test]
	fn json_media_type_ignores_parameters_and_case() {
		assert!(is_json_media_type("application/json"));
		assert!(is_json_media_type("Application/JSON; charset=utf-8"));
		assert!(!is_json_media_type("text/html"));
		assert!(!is_json_media_type("application/jsonp"));
	}

	#[test]
	fn read_json_reports_non_json_bodies_verbatim() {
		let err = read_json(ExchangeStage::Token, response(200, Some("text/html"), "<html>oops"))
			.expect_err("HTML must be rejected.");

		match err {
			Error::Protocol(ProtocolError::NotJson { stage, content_type, body }) => {
				assert_eq!(stage, ExchangeStage::Token);
				assert_eq!(content_type.as_deref(), Some("text/html"));
				assert_eq!(body, "<html>oops");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert!(matches!(
			read_json(ExchangeStage::Token, response(200, None, "{}")),
			Err(Error::Protocol(ProtocolError::NotJson { content_type: None, .. }))
		));
	}

	#[test]
	fn read_json_rejects_empty_malformed_and_non_object_bodies() {
		assert!(matches!(
			read_json(ExchangeStage::Userinfo, response(200, Some(JSON_CONTENT_TYPE), "  ")),
			Err(Error::Protocol(ProtocolError::EmptyBody { stage: ExchangeStage::Userinfo }))
		));
		assert!(matches!(
			read_json(ExchangeStage::Userinfo, response(200, Some(JSON_CONTENT_TYPE), "{\"sub\":")),
			Err(Error::Protocol(ProtocolError::MalformedJson { .. }))
		));
		assert!(matches!(
			read_json(ExchangeStage::Userinfo, response(200, Some(JSON_CONTENT_TYPE), "[1]")),
			Err(Error::Protocol(ProtocolError::NotAnObject { .. }))
		));
	}

	#[test]
	fn read_json_surfaces_oauth_errors() {
		let err = read_json(
			ExchangeStage::Token,
			response(
				400,
				Some(JSON_CONTENT_TYPE),
				r#"{"error":"invalid_grant","error_description":"expired"}"#,
			),
		)
		.expect_err("OAuth errors must be rejected.");

		match err {
			Error::Protocol(ProtocolError::ProviderRejected { status, error, description, .. }) => {
				assert_eq!(status, 400);
				assert_eq!(error, "invalid_grant");
				assert_eq!(description.as_deref(), Some("expired"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}

		assert!(matches!(
			read_json(ExchangeStage::Userinfo, response(502, Some(JSON_CONTENT_TYPE), "{}")),
			Err(Error::Protocol(ProtocolError::UnexpectedStatus { status: 502, .. }))
		));
	}

	#[test]
	fn read_json_keeps_the_raw_body() {
		let json = read_json(
			ExchangeStage::Userinfo,
			response(200, Some(JSON_CONTENT_TYPE), r#"{"sub":"u-1"}"#),
		)
		.expect("JSON objects should be accepted.");

		assert_eq!(json.body, r#"{"sub":"u-1"}"#);
		assert_eq!(json.object.get("sub"), Some(&Value::from("u-1")));
	}
}
