// std
use std::net::TcpListener;
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use authentik_oath::{
	claims::{Email, OpenId, Profile},
	error::{Error, ProtocolError, TransportError},
	flows::{ExchangeStage, ReqwestProviderClient},
	http::ReqwestHttpClient,
	provider::{ClientConfig, Credentials},
};

const CLIENT_ID: &str = "authentik-client";
const CLIENT_SECRET: &str = "authentik-secret";
const REDIRECT: &str = "https://app.example.com/callback";

// httpmock serves TLS with a self-signed certificate.
fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestHttpClient::client_builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

fn build_client(endpoint: &str) -> ReqwestProviderClient {
	let config = ClientConfig::new(endpoint, Credentials {
		id: CLIENT_ID.into(),
		secret: CLIENT_SECRET.into(),
		redirect: REDIRECT.into(),
	})
	.expect("Client configuration should be valid.");

	ReqwestProviderClient::with_http_client(config, test_reqwest_http_client())
}

fn basic_authorization() -> String {
	format!("Basic {}", STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}")))
}

async fn mock_token<'a>(server: &'a MockServer, access_token: &str) -> httpmock::Mock<'a> {
	let body = json!({ "access_token": access_token, "token_type": "Bearer", "expires_in": 300 });

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/application/o/token/")
				.header("authorization", basic_authorization())
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(body.to_string());
		})
		.await
}

async fn mock_userinfo<'a>(server: &'a MockServer, userinfo: &Value) -> httpmock::Mock<'a> {
	let body = userinfo.to_string();

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/application/o/userinfo/")
				.header("authorization", basic_authorization())
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200)
				.header("content-type", "application/json; charset=utf-8")
				.body(body);
		})
		.await
}

#[tokio::test]
async fn resolve_user_raw_returns_userinfo_verbatim() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let userinfo = json!({
		"sub": "0f3c2b",
		"email": "ada@example.com",
		"email_verified": true,
		"preferred_username": "ada",
		"groups": ["admins", "staff"],
		"ak_proxy": { "user_attributes": {} },
	});
	let token = mock_token(&server, "tok123").await;
	let info = mock_userinfo(&server, &userinfo).await;
	let raw = client.resolve_user_raw("code-abc").await.expect("Resolution should succeed.");

	token.assert_async().await;
	info.assert_async().await;

	assert_eq!(Value::Object(raw), userinfo);
}

#[tokio::test]
async fn resolve_user_as_shapes_claims_by_scope() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let userinfo = json!({
		"sub": "0f3c2b",
		"email": "ada@example.com",
		"email_verified": true,
		"name": "Ada Lovelace",
		"groups": ["admins"],
	});
	let _token = mock_token(&server, "tok123").await;
	let _info = mock_userinfo(&server, &userinfo).await;
	let user = client
		.resolve_user_as::<(OpenId, Email, Profile)>("code-abc")
		.await
		.expect("Resolution should succeed.");
	let (openid, email, profile) = &*user;

	assert_eq!(openid.sub, "0f3c2b");
	assert_eq!(email.verified_email(), Some("ada@example.com"));
	assert_eq!(profile.name.as_deref(), Some("Ada Lovelace"));
	assert_eq!(profile.groups.as_deref(), Some(&["admins".to_owned()][..]));
	assert_eq!(profile.picture, None);
	assert_eq!(user.get("name"), Some(&Value::from("Ada Lovelace")));
}

#[tokio::test]
async fn resolve_user_uses_default_scopes() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let _token = mock_token(&server, "tok123").await;
	let _info = mock_userinfo(&server, &json!({ "sub": "only-sub" })).await;
	let user = client.resolve_user("code-abc").await.expect("Resolution should succeed.");

	assert_eq!(user.0.sub, "only-sub");
	assert_eq!(user.1.email, None);
	assert_eq!(user.2.nickname, None);
}

#[tokio::test]
async fn non_json_token_response_skips_userinfo() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/application/o/token/");
			then.status(502).header("content-type", "text/html").body("<h1>Bad Gateway</h1>");
		})
		.await;
	let info = mock_userinfo(&server, &json!({ "sub": "never" })).await;
	let err = client.resolve_user_raw("code-abc").await.expect_err("HTML must be rejected.");

	token.assert_calls_async(1).await;
	info.assert_calls_async(0).await;

	match err {
		Error::Protocol(ProtocolError::NotJson { stage, body, .. }) => {
			assert_eq!(stage, ExchangeStage::Token);
			assert_eq!(body, "<h1>Bad Gateway</h1>");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn token_response_without_access_token_skips_userinfo() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/application/o/token/");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let info = mock_userinfo(&server, &json!({ "sub": "never" })).await;
	let err = client.resolve_user("code-abc").await.expect_err("Missing tokens must be rejected.");

	info.assert_calls_async(0).await;

	assert!(matches!(err, Error::Protocol(ProtocolError::MissingAccessToken { .. })));
	assert_eq!(err.stage(), Some(ExchangeStage::Token));
}

#[tokio::test]
async fn rejected_code_surfaces_the_oauth_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path("/application/o/token/");
			then.status(400).header("content-type", "application/json").body(
				"{\"error\":\"invalid_grant\",\"error_description\":\"The authorization code is invalid.\"}",
			);
		})
		.await;
	let err = client.exchange_code("reused").await.expect_err("Reused codes must be rejected.");

	match err {
		Error::Protocol(ProtocolError::ProviderRejected { stage, status, error, description }) => {
			assert_eq!(stage, ExchangeStage::Token);
			assert_eq!(status, 400);
			assert_eq!(error, "invalid_grant");
			assert_eq!(description.as_deref(), Some("The authorization code is invalid."));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn mistyped_claims_fail_typed_resolution_only() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let userinfo = json!({ "sub": "0f3c2b", "email": "ada@example.com", "email_verified": "yes" });
	let _token = mock_token(&server, "tok123").await;
	let _info = mock_userinfo(&server, &userinfo).await;
	let err = client
		.resolve_user_as::<(OpenId, Email)>("code-abc")
		.await
		.expect_err("A string email_verified must be rejected.");

	match &err {
		Error::Protocol(ProtocolError::ClaimsShape { source }) =>
			assert_eq!(source.path().to_string(), "email_verified"),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let raw = client.resolve_user_raw("code-abc").await.expect("Raw resolution should succeed.");

	assert_eq!(raw.get("email_verified"), Some(&Value::from("yes")));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
	let port = {
		let listener = TcpListener::bind("127.0.0.1:0").expect("Ephemeral port should bind.");

		listener.local_addr().expect("Listener should expose its address.").port()
	};
	let client = build_client(&format!("http://127.0.0.1:{port}"));
	let err = client.resolve_user("code-abc").await.expect_err("Closed ports must fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })), "{err:?}");
	assert_eq!(err.stage(), Some(ExchangeStage::Token));
	assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn one_client_serves_concurrent_resolutions() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let token = mock_token(&server, "tok123").await;
	let info = mock_userinfo(&server, &json!({ "sub": "0f3c2b" })).await;
	let other = client.clone();
	let (first, second) =
		tokio::join!(client.resolve_user_raw("code-a"), other.resolve_user_raw("code-b"));

	assert_eq!(first.expect("First resolution should succeed.").get("sub"), Some(&"0f3c2b".into()));
	assert_eq!(
		second.expect("Second resolution should succeed.").get("sub"),
		Some(&"0f3c2b".into())
	);

	token.assert_calls_async(2).await;
	info.assert_calls_async(2).await;
}

#[tokio::test]
async fn token_redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let client = build_client(&server.base_url());
	let target = server.url("/elsewhere");
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/application/o/token/");
			then.status(302).header("location", target);
		})
		.await;
	let elsewhere = server
		.mock_async(|when, then| {
			when.path("/elsewhere");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"redirected\"}");
		})
		.await;
	let err = client.exchange_code("code-abc").await.expect_err("Redirects must not be followed.");

	token.assert_calls_async(1).await;
	elsewhere.assert_calls_async(0).await;

	assert!(
		matches!(err, Error::Protocol(ProtocolError::NotJson { stage: ExchangeStage::Token, .. })),
		"{err:?}"
	);
}

#[test]
fn default_transport_builds_without_tls_overrides() {
	let client = ReqwestProviderClient::new("https://auth.example.com", Credentials {
		id: CLIENT_ID.into(),
		secret: CLIENT_SECRET.into(),
		redirect: REDIRECT.into(),
	})
	.expect("Client should build for a valid configuration.");

	assert_eq!(client.config().client_id.as_str(), CLIENT_ID);
}
