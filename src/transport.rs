//! Configuration → reqwest transport helpers
//!
//! Generated client libraries call these from their invokers: build a blocking
//! client honoring the invocation's proxy/TLS settings, apply the selected
//! auth mode, and translate HTTP failures into the shared `ApiError`.

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::{AuthMode, Configuration};
use crate::error::ApiError;

/// Header carrying the key for `AuthMode::ApiKey`.
const API_KEY_HEADER: &str = "X-API-Key";

/// Build a blocking HTTP client bound to one invocation's configuration.
pub fn http_client(configuration: &Configuration) -> Result<Client, ApiError> {
    let mut builder = Client::builder()
        .danger_accept_invalid_certs(!configuration.verify_ssl)
        .connection_verbose(configuration.debug);
    if let Some(proxy) = &configuration.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }
    Ok(builder.build()?)
}

/// Apply the configured auth mode to a request.
pub fn authorize(req: RequestBuilder, auth: &AuthMode) -> RequestBuilder {
    match auth {
        AuthMode::None => req,
        AuthMode::Bearer(token) => req.bearer_auth(token),
        AuthMode::Basic(credentials) => {
            req.basic_auth(&credentials.username, Some(&credentials.password))
        }
        AuthMode::ApiKey(key) => req.header(API_KEY_HEADER, key),
    }
}

/// Send a request and translate the outcome into the client-library contract:
/// a decoded JSON value on success, an `ApiError` carrying the status line
/// otherwise.
pub fn execute(req: RequestBuilder) -> Result<Value, ApiError> {
    let resp = req.send()?;
    let status = resp.status();
    let text = resp.text()?;

    if !status.is_success() {
        let message = if text.is_empty() {
            status.to_string()
        } else {
            format!("{status}: {text}")
        };
        return Err(ApiError::new(message));
    }

    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BasicCredentials;
    use serde_json::json;

    #[test]
    fn http_client_builds_from_default_configuration() {
        assert!(http_client(&Configuration::default()).is_ok());
    }

    #[test]
    fn http_client_rejects_malformed_proxy_url() {
        let configuration = Configuration {
            proxy: Some("not a url".to_string()),
            ..Configuration::default()
        };
        assert!(http_client(&configuration).is_err());
    }

    #[test]
    fn execute_decodes_json_response() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/users/7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":7}"#)
            .create();

        let client = http_client(&Configuration::default()).unwrap();
        let result = execute(client.get(format!("{}/users/7", server.url()))).unwrap();

        assert_eq!(result, json!({"id": 7}));
        mock.assert();
    }

    #[test]
    fn execute_returns_raw_text_for_non_json_response() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/plain")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("pong")
            .create();

        let client = http_client(&Configuration::default()).unwrap();
        let result = execute(client.get(format!("{}/plain", server.url()))).unwrap();

        assert_eq!(result, Value::String("pong".to_string()));
    }

    #[test]
    fn execute_non_success_status_carries_the_status_line() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("GET", "/missing").with_status(404).create();

        let client = http_client(&Configuration::default()).unwrap();
        let err = execute(client.get(format!("{}/missing", server.url()))).unwrap_err();

        assert_eq!(err.message, "404 Not Found");
    }

    #[test]
    fn authorize_applies_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/secure")
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_body("{}")
            .create();

        let client = http_client(&Configuration::default()).unwrap();
        let req = authorize(
            client.get(format!("{}/secure", server.url())),
            &AuthMode::Bearer("tok-123".to_string()),
        );
        execute(req).unwrap();
        mock.assert();
    }

    #[test]
    fn authorize_applies_basic_credentials() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/secure")
            .match_header("authorization", "Basic dTpw")
            .with_status(200)
            .with_body("{}")
            .create();

        let client = http_client(&Configuration::default()).unwrap();
        let req = authorize(
            client.get(format!("{}/secure", server.url())),
            &AuthMode::Basic(BasicCredentials {
                username: "u".to_string(),
                password: "p".to_string(),
            }),
        );
        execute(req).unwrap();
        mock.assert();
    }

    #[test]
    fn authorize_applies_api_key_header() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/secure")
            .match_header("x-api-key", "key-1")
            .with_status(200)
            .with_body("{}")
            .create();

        let client = http_client(&Configuration::default()).unwrap();
        let req = authorize(
            client.get(format!("{}/secure", server.url())),
            &AuthMode::ApiKey("key-1".to_string()),
        );
        execute(req).unwrap();
        mock.assert();
    }
}
