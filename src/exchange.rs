//! Types for exchanging an authorization code for an access token.
//!
//! This module:
//! - `Code`: The authorization code received on the callback route.
//! - `AccessToken`: The token Google returns, used once to fetch the profile.
//! - `TokenExchangeRequest`: A data structure for sending requests to the token endpoint.
//! - `TokenExchangeResponse`: A data structure for parsing the token endpoint's response.

use serde::{Deserialize, Serialize};

use crate::config::{ClientID, ClientSecret, Config, RedirectURI, TokenEndPoint};

/// The `code` query parameter Google appends to the callback redirect.
/// Consumed exactly once per callback invocation, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Code(pub(crate) String);

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Represents an OAuth 2.0 access token.
/// This token is used to call Google's profile endpoint, then discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Retrieves the access token as a string.
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A structure used to send a code-for-token request to Google's token endpoint.
#[derive(Debug, Clone)]
pub struct TokenExchangeRequest {
    token_endpoint: TokenEndPoint,
    code: Code,
    client_id: ClientID,
    client_secret: ClientSecret,
    redirect_uri: RedirectURI,
    grant_type: String,
}

impl TokenExchangeRequest {
    /// Creates a new request using parameters from `Config`.
    pub fn new(config: &Config, code: Code) -> Self {
        Self {
            token_endpoint: config.token_endpoint.to_owned(),
            code,
            client_id: config.client_id.to_owned(),
            client_secret: config.client_secret.to_owned(),
            redirect_uri: config.redirect_uri.to_owned(),
            grant_type: "authorization_code".to_string(),
        }
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint.0
    }

    pub fn code(&self) -> &str {
        &self.code.0
    }

    pub fn client_id(&self) -> &str {
        &self.client_id.0
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret.0
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri.0
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }
}

/// Represents the response from Google's token endpoint.
///
/// Only `access_token` is required: the callback flow reads nothing else, so
/// a body without that field is the only decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    access_token: AccessToken,
    expires_in: Option<u32>,
    scope: Option<String>,
    token_type: Option<String>,
    refresh_token: Option<String>,
}

impl TokenExchangeResponse {
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn expires_in(&self) -> Option<u32> {
        self.expires_in
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::config::ConfigBuilder;

    use super::{AccessToken, Code, TokenExchangeRequest, TokenExchangeResponse};

    #[test]
    fn test_access_token_value() {
        let token = AccessToken("test_token".to_string());
        assert_eq!(token.value(), "test_token");
    }

    #[test]
    fn test_token_exchange_request_new() {
        let config = ConfigBuilder::new()
            .token_endpoint("https://token.example.com")
            .client_id("client_id")
            .client_secret("secret")
            .redirect_uri("https://redirect.example.com")
            .build();

        let code = Code::from("auth_code".to_string());
        let request = TokenExchangeRequest::new(&config, code.clone());

        assert_eq!(request.token_endpoint(), "https://token.example.com");
        assert_eq!(request.client_id(), "client_id");
        assert_eq!(request.client_secret(), "secret");
        assert_eq!(request.redirect_uri(), "https://redirect.example.com");
        assert_eq!(request.code(), "auth_code");
        assert_eq!(request.grant_type(), "authorization_code");
    }

    #[test]
    fn test_token_exchange_response_minimal_body() {
        let body = r#"{"access_token": "T"}"#;
        let res: TokenExchangeResponse = serde_json::from_str(body).unwrap();

        assert_eq!(res.access_token().value(), "T");
        assert!(res.expires_in().is_none());
        assert!(res.refresh_token().is_none());
    }

    #[test]
    fn test_token_exchange_response_full_body() {
        let body = r#"{
            "access_token": "my_access_token",
            "expires_in": 3600,
            "scope": "openid email profile",
            "token_type": "Bearer",
            "refresh_token": "my_refresh_token"
        }"#;
        let res: TokenExchangeResponse = serde_json::from_str(body).unwrap();

        assert_eq!(res.access_token().value(), "my_access_token");
        assert_eq!(res.expires_in(), Some(3600));
        assert_eq!(res.scope(), Some("openid email profile"));
        assert_eq!(res.token_type(), Some("Bearer"));
        assert_eq!(res.refresh_token(), Some("my_refresh_token"));
    }

    #[test]
    fn test_token_exchange_response_missing_access_token() {
        let body = r#"{"token_type": "Bearer"}"#;
        let res = serde_json::from_str::<TokenExchangeResponse>(body);
        assert!(res.is_err());
    }
}
