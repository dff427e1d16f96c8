//! Defines the process-wide configuration and how it is loaded.
//!
//! Configuration is assembled once at startup from two sources:
//! - Environment variables (`TOKEN_FILE_PATH`, `CLIENT_SECRET_FILE`,
//!   `FRONTEND_URL`), read through `dotenvy` so a local `.env` file works.
//! - The Google client-secret JSON file, which supplies the client id, the
//!   client secret and the registered redirect URIs.
//!
//! ## Structures
//! - `Config`: Stores all the necessary information for the login flow.
//! - `ConfigBuilder`: A builder for constructing a `Config` instance.
//!
//! # Example
//! ```rust,no_run
//! use google_login_bridge::config::Config;
//!
//! let config = Config::builder()
//!     .auth_endpoint("https://accounts.google.com/o/oauth2/auth")
//!     .client_id("your-client-id")
//!     .client_secret("your-client-secret")
//!     .token_endpoint("https://accounts.google.com/o/oauth2/token")
//!     .userinfo_endpoint("https://www.googleapis.com/oauth2/v1/userinfo")
//!     .redirect_uri("http://localhost:8000/auth/google")
//!     .frontend_url("http://localhost:5173")
//!     .token_file_path("token.json")
//!     .build();
//! ```
//!
//! A failure in any loading step is fatal: no handler can serve without the
//! derived secrets, so `main` exits instead of starting the listener.

use std::fs;

use serde::Deserialize;
use tracing::error;

use crate::error::Error;

/// Google's authorization (consent screen) endpoint.
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
/// Google's code-for-token exchange endpoint.
pub const GOOGLE_TOKEN_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/token";
/// Google's basic profile endpoint.
pub const GOOGLE_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v1/userinfo";

#[derive(Debug, Clone, Default)]
pub(crate) struct AuthEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientID(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientSecret(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct TokenEndPoint(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct UserInfoEndPoint(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct RedirectURI(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct FrontendURL(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct TokenFilePath(pub String);

/// Holds everything the handlers need: the OAuth client credentials, the
/// Google endpoints, the frontend to redirect to and the credential file
/// path used by the dormant loader.
///
/// It is designed to be immutable once constructed and is shared read-only
/// across requests.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) auth_endpoint: AuthEndPoint,
    pub(crate) client_id: ClientID,
    pub(crate) client_secret: ClientSecret,
    pub(crate) token_endpoint: TokenEndPoint,
    pub(crate) userinfo_endpoint: UserInfoEndPoint,
    pub(crate) redirect_uri: RedirectURI,
    pub(crate) frontend_url: FrontendURL,
    pub(crate) token_file_path: TokenFilePath,
}

// ==========impl Config==========
impl Config {
    /// Returns a new `ConfigBuilder` instance to create a `Config` object.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Loads the configuration from the environment.
    ///
    /// Reads `TOKEN_FILE_PATH`, `CLIENT_SECRET_FILE` and `FRONTEND_URL`,
    /// then the client-secret JSON file the second variable points at.
    /// The three Google endpoints are filled with their production values.
    pub fn from_env() -> Result<Self, Error> {
        let token_file_path = read_env("TOKEN_FILE_PATH")?;
        let client_secret_file = read_env("CLIENT_SECRET_FILE")?;
        let frontend_url = read_env("FRONTEND_URL")?;
        Self::from_sources(&token_file_path, &client_secret_file, &frontend_url)
    }

    /// Builds the configuration from explicit sources. `from_env` delegates
    /// here; tests call it directly with fixture files.
    pub fn from_sources(
        token_file_path: &str,
        client_secret_file: &str,
        frontend_url: &str,
    ) -> Result<Self, Error> {
        let secrets = ClientSecretFile::read(client_secret_file)?;
        let first_uri = secrets
            .installed
            .redirect_uris
            .first()
            .ok_or_else(|| {
                error!("Client secret file lists no redirect uris");
                Error::RedirectURIMissing
            })?;
        // The listener is bound to port 8000; the registered redirect URI is
        // the first configured host with the callback route appended.
        let redirect_uri = format!("{}:8000/auth/google", first_uri);

        Ok(Config::builder()
            .auth_endpoint(GOOGLE_AUTH_ENDPOINT)
            .client_id(&secrets.installed.client_id)
            .client_secret(&secrets.installed.client_secret)
            .token_endpoint(GOOGLE_TOKEN_ENDPOINT)
            .userinfo_endpoint(GOOGLE_USERINFO_ENDPOINT)
            .redirect_uri(&redirect_uri)
            .frontend_url(frontend_url)
            .token_file_path(token_file_path)
            .build())
    }
}

/// The `installed` section of a client-secret file downloaded from the
/// Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstalledClient {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uris: Vec<String>,
}

/// On-disk shape of the client-secret JSON file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClientSecretFile {
    pub installed: InstalledClient,
}

impl ClientSecretFile {
    fn read(path: &str) -> Result<Self, Error> {
        let raw = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read client secret file {}: {}", path, e);
            Error::ClientSecretRead
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            error!("Failed to parse client secret file {}: {}", path, e);
            Error::ClientSecretParse
        })
    }
}

fn read_env(key: &str) -> Result<String, Error> {
    dotenvy::var(key).map_err(|e| {
        error!("Failed to read environment variable {}: {}", key, e);
        Error::Env(key.to_string())
    })
}

/// Provides a convenient way to create a `Config` instance step by step.
///
/// # Example
/// ```rust,no_run
/// use google_login_bridge::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .auth_endpoint("https://accounts.google.com/o/oauth2/auth")
///     .client_id("your-client-id")
///     .client_secret("your-client-secret")
///     .token_endpoint("https://accounts.google.com/o/oauth2/token")
///     .userinfo_endpoint("https://www.googleapis.com/oauth2/v1/userinfo")
///     .redirect_uri("http://localhost:8000/auth/google")
///     .frontend_url("http://localhost:5173")
///     .token_file_path("token.json")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    auth_endpoint: AuthEndPoint,
    client_id: ClientID,
    client_secret: ClientSecret,
    token_endpoint: TokenEndPoint,
    userinfo_endpoint: UserInfoEndPoint,
    redirect_uri: RedirectURI,
    frontend_url: FrontendURL,
    token_file_path: TokenFilePath,
}

// ==========impl ConfigBuilder==========
impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` instance with default values.
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Sets the authorization endpoint URL.
    pub fn auth_endpoint(mut self, auth_endpoint: &str) -> Self {
        self.auth_endpoint = AuthEndPoint(auth_endpoint.to_string());
        self
    }

    /// Sets the client ID obtained from Google Cloud Console.
    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = ClientID(client_id.to_string());
        self
    }

    /// Sets the client secret associated with the client ID.
    pub fn client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = ClientSecret(client_secret.to_string());
        self
    }

    /// Sets the token exchange endpoint URL.
    pub fn token_endpoint(mut self, token_endpoint: &str) -> Self {
        self.token_endpoint = TokenEndPoint(token_endpoint.to_string());
        self
    }

    /// Sets the profile (userinfo) endpoint URL.
    pub fn userinfo_endpoint(mut self, userinfo_endpoint: &str) -> Self {
        self.userinfo_endpoint = UserInfoEndPoint(userinfo_endpoint.to_string());
        self
    }

    /// Sets the redirect URI registered in Google Cloud Console.
    pub fn redirect_uri(mut self, redirect_uri: &str) -> Self {
        self.redirect_uri = RedirectURI(redirect_uri.to_string());
        self
    }

    /// Sets the frontend URL the callback handler redirects to.
    pub fn frontend_url(mut self, frontend_url: &str) -> Self {
        self.frontend_url = FrontendURL(frontend_url.to_string());
        self
    }

    /// Sets the path of the cached credential file.
    pub fn token_file_path(mut self, token_file_path: &str) -> Self {
        self.token_file_path = TokenFilePath(token_file_path.to_string());
        self
    }

    /// Constructs a `Config` instance with the provided values.
    pub fn build(self) -> Config {
        Config {
            auth_endpoint: self.auth_endpoint,
            client_id: self.client_id,
            client_secret: self.client_secret,
            token_endpoint: self.token_endpoint,
            userinfo_endpoint: self.userinfo_endpoint,
            redirect_uri: self.redirect_uri,
            frontend_url: self.frontend_url,
            token_file_path: self.token_file_path,
        }
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::error::Error;

    use super::{Config, ConfigBuilder, GOOGLE_AUTH_ENDPOINT, GOOGLE_TOKEN_ENDPOINT};

    #[test]
    fn test_config_builder() {
        let auth_endpoint = "https://auth.example.com/auth";
        let client_id = "my_client_id";
        let client_secret = "my_secret";
        let token_endpoint = "https://token.example.com";
        let userinfo_endpoint = "https://userinfo.example.com";
        let redirect_uri = "https://redirect.example.com";
        let frontend_url = "https://frontend.example.com";
        let token_file_path = "token.json";

        let config = ConfigBuilder::new()
            .auth_endpoint(auth_endpoint)
            .client_id(client_id)
            .client_secret(client_secret)
            .token_endpoint(token_endpoint)
            .userinfo_endpoint(userinfo_endpoint)
            .redirect_uri(redirect_uri)
            .frontend_url(frontend_url)
            .token_file_path(token_file_path)
            .build();

        assert_eq!(config.auth_endpoint.0, auth_endpoint);
        assert_eq!(config.client_id.0, client_id);
        assert_eq!(config.client_secret.0, client_secret);
        assert_eq!(config.token_endpoint.0, token_endpoint);
        assert_eq!(config.userinfo_endpoint.0, userinfo_endpoint);
        assert_eq!(config.redirect_uri.0, redirect_uri);
        assert_eq!(config.frontend_url.0, frontend_url);
        assert_eq!(config.token_file_path.0, token_file_path);
    }

    #[test]
    fn test_config_builder_default() {
        let builder = ConfigBuilder::default();

        assert_eq!(builder.auth_endpoint.0, "");
        assert_eq!(builder.client_id.0, "");
        assert_eq!(builder.client_secret.0, "");
        assert_eq!(builder.token_endpoint.0, "");
        assert_eq!(builder.userinfo_endpoint.0, "");
        assert_eq!(builder.redirect_uri.0, "");
        assert_eq!(builder.frontend_url.0, "");
        assert_eq!(builder.token_file_path.0, "");
    }

    fn write_client_secret(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_from_sources() {
        let file = write_client_secret(
            r#"{
                "installed": {
                    "client_id": "my_client_id",
                    "client_secret": "my_secret",
                    "redirect_uris": ["http://localhost"]
                }
            }"#,
        );

        let config = Config::from_sources(
            "token.json",
            file.path().to_str().unwrap(),
            "https://frontend.example.com",
        )
        .unwrap();

        assert_eq!(config.client_id.0, "my_client_id");
        assert_eq!(config.client_secret.0, "my_secret");
        assert_eq!(config.redirect_uri.0, "http://localhost:8000/auth/google");
        assert_eq!(config.auth_endpoint.0, GOOGLE_AUTH_ENDPOINT);
        assert_eq!(config.token_endpoint.0, GOOGLE_TOKEN_ENDPOINT);
        assert_eq!(config.frontend_url.0, "https://frontend.example.com");
        assert_eq!(config.token_file_path.0, "token.json");
    }

    #[test]
    fn test_from_sources_missing_file() {
        let result = Config::from_sources(
            "token.json",
            "/nonexistent/client_secret.json",
            "https://frontend.example.com",
        );
        assert!(matches!(result, Err(Error::ClientSecretRead)));
    }

    #[test]
    fn test_from_sources_malformed_file() {
        let file = write_client_secret("not json at all");
        let result = Config::from_sources(
            "token.json",
            file.path().to_str().unwrap(),
            "https://frontend.example.com",
        );
        assert!(matches!(result, Err(Error::ClientSecretParse)));
    }

    #[test]
    fn test_from_sources_empty_redirect_uris() {
        let file = write_client_secret(
            r#"{
                "installed": {
                    "client_id": "my_client_id",
                    "client_secret": "my_secret",
                    "redirect_uris": []
                }
            }"#,
        );
        let result = Config::from_sources(
            "token.json",
            file.path().to_str().unwrap(),
            "https://frontend.example.com",
        );
        assert!(matches!(result, Err(Error::RedirectURIMissing)));
    }
}
