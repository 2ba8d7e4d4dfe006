//! Blocking reqwest client against a local mock server.

use dashmeta_core::ExtractError;
use dashmeta_restapi::{BasicAuth, HttpClient, ReqwestClient};
use mockito::Matcher;
use serde_json::json;

// base64("user:pass")
const BASIC_USER_PASS: &str = "Basic dXNlcjpwYXNz";

#[test]
fn test_get_json_with_basic_auth() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/api/acme/spaces(\?filter=all)?$".to_string()))
        .match_query(Matcher::UrlEncoded("filter".to_string(), "all".to_string()))
        .match_header("authorization", BASIC_USER_PASS)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_embedded":{"spaces":[{"token":"sp1"}]}}"#)
        .create();

    let client = ReqwestClient::new().unwrap();
    let url = format!("{}/api/acme/spaces?filter=all", server.url());
    let body = client
        .get_json(&url, Some(&BasicAuth::new("user", "pass")))
        .unwrap();

    mock.assert();
    assert_eq!(body, json!({"_embedded": {"spaces": [{"token": "sp1"}]}}));
}

#[test]
fn test_error_status_is_reported() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/api/acme/spaces")
        .with_status(500)
        .with_body("boom")
        .create();

    let client = ReqwestClient::new().unwrap();
    let url = format!("{}/api/acme/spaces", server.url());
    let err = client.get_json(&url, None).unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(matches!(err, ExtractError::Http { .. }));
}

#[test]
fn test_invalid_json_is_a_decode_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/runs/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("<html>not json</html>")
        .create();

    let client = ReqwestClient::new().unwrap();
    let err = client
        .get_json(&format!("{}/runs/1", server.url()), None)
        .unwrap_err();

    assert!(matches!(err, ExtractError::Decode { .. }), "{}", err);
}
