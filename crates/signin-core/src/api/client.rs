//! API client for the login endpoint.
//!
//! One request per call: the credentials are posted as JSON and the
//! response is decoded into a token or an `ApiError`. No retries.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{Credentials, LoginResponse};

use super::ApiError;

/// API client for the login endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    login_url: String,
}

impl ApiClient {
    /// Create a client for the endpoint described by `config`
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            login_url: config.login_url(),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Post the credentials and return the token from a successful response
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        debug!(url = %self.login_url, email = %credentials.email, "Sending login request");

        // `.json()` sets `Content-Type: application/json`
        let response = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Login request failed");
            return Err(ApiError::from_status(status, &body));
        }

        let decoded: LoginResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse login response: {}", e)))?;

        match decoded {
            LoginResponse::Success { token } if token.is_empty() => {
                Err(ApiError::InvalidResponse("Empty token in login response".to_string()))
            }
            LoginResponse::Success { token } => {
                debug!(status = status.as_u16(), "Login request succeeded");
                Ok(token)
            }
            LoginResponse::Failure { error } => {
                warn!(status = status.as_u16(), "Login response carried an error");
                Err(ApiError::Rejected(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client_for(uri: &str) -> ApiClient {
        let config = Config {
            api_url: uri.to_string(),
            request_timeout_secs: 5,
            ..Config::default()
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_login_url_from_config() {
        let client = client_for("http://localhost:3000/");
        assert_eq!(client.login_url(), "http://localhost:3000/api/login");
    }

    #[tokio::test]
    async fn test_login_posts_exact_body_and_returns_token() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(header("content-type", "application/json"))
            .and(body_string(
                r#"{"email":"eve.holt@reqres.in","password":"cityslicka"}"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "QpwL5tke4Pnpja7X4"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let token = client
            .login(&Credentials::new("eve.holt@reqres.in", "cityslicka"))
            .await
            .unwrap();
        assert_eq!(token, "QpwL5tke4Pnpja7X4");
    }

    #[tokio::test]
    async fn test_login_error_status_is_rejected() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "user not found"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .login(&Credentials::new("email@email.com", "password"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "user not found"));
    }

    #[tokio::test]
    async fn test_login_success_status_with_error_body_is_rejected() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "Missing password"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .login(&Credentials::new("email@email.com", "password"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_shape_is_invalid_response() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "session": "abc"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .login(&Credentials::new("email@email.com", "password"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_login_empty_token_is_invalid_response() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "" })))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .login(&Credentials::new("eve.holt@reqres.in", "cityslicka"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_login_connection_refused_is_network_error() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        // Reserve a port, then release it so nothing is listening
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let client = client_for(&format!("http://127.0.0.1:{}", port));
        let err = client
            .login(&Credentials::new("eve.holt@reqres.in", "cityslicka"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));
        assert!(err.user_message().contains("Unable to connect"));
    }
}
