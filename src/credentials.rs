//! Loader for the locally cached credential file.
//!
//! No active route calls this; it is kept for the credential-file workflow
//! the service was built around and is exercised by its tests only.
//!
//! This module:
//! - `StoredCredential`: The authorized-user JSON blob written next to the service.
//! - `RefreshRequest`: A structure for sending a refresh request to the token endpoint.
//! - `RefreshResponse`: A structure for parsing the refresh response.
//! - `load_credentials`: Read the file, refresh the credential if it expired, rewrite it.
//!
//! The read-refresh-write sequence takes no file lock; two concurrent
//! invocations race on the same file.

use std::{fs, path::Path};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    config::{ClientID, ClientSecret, Config},
    error::Error,
    executer::{Executer, RefreshExe},
};

/// A previously obtained credential, cached on disk in the authorized-user
/// JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub scopes: Option<Vec<String>>,
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredCredential {
    /// A credential with no recorded expiry never counts as expired.
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= Utc::now())
    }
}

/// Represents a request to exchange a refresh token for a new access token.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    token_endpoint: String,
    client_id: ClientID,
    client_secret: ClientSecret,
    refresh_token: String,
    grant_type: String,
}

impl RefreshRequest {
    /// Creates a new `RefreshRequest` with the necessary parameters.
    pub fn new(config: &Config, refresh_token: &str) -> Self {
        Self {
            token_endpoint: config.token_endpoint.0.to_owned(),
            client_id: config.client_id.to_owned(),
            client_secret: config.client_secret.to_owned(),
            refresh_token: refresh_token.to_string(),
            grant_type: "refresh_token".to_string(),
        }
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint
    }

    pub fn client_id(&self) -> &str {
        &self.client_id.0
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret.0
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }
}

/// Represents the response from the token endpoint when exchanging a refresh
/// token for a new access token.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    access_token: String,
    expires_in: u32,
    scope: Option<String>,
    token_type: Option<String>,
}

impl RefreshResponse {
    /// Retrieves the newly issued access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the expiration time (in seconds) of the access token.
    pub fn expires_in(&self) -> u32 {
        self.expires_in
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }
}

/// Loads the cached credential from the configured file path.
///
/// Returns `Ok(None)` when the file does not exist. When the credential is
/// expired and carries a refresh token, it is refreshed against the token
/// endpoint and the file is rewritten in place before the credential is
/// returned.
pub async fn load_credentials(config: &Config) -> Result<Option<StoredCredential>, Error> {
    let path = Path::new(&config.token_file_path.0);
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(|e| {
        error!("Failed to read credential file {}: {}", path.display(), e);
        Error::CredentialRead
    })?;
    let mut creds: StoredCredential = serde_json::from_str(&raw).map_err(|e| {
        error!("Failed to parse credential file {}: {}", path.display(), e);
        Error::CredentialParse
    })?;

    if creds.is_expired() {
        if let Some(refresh_token) = creds.refresh_token.clone() {
            let req = RefreshRequest::new(config, &refresh_token);
            let res = RefreshExe.execute(&req).await.map_err(|e| {
                error!("Failed to refresh credential: {}", e);
                Error::Refresh
            })?;

            creds.token = res.access_token().to_string();
            creds.expiry = Some(Utc::now() + Duration::seconds(i64::from(res.expires_in())));

            let serialized = serde_json::to_string(&creds).map_err(|e| {
                error!("Failed to serialize credential: {}", e);
                Error::CredentialWrite
            })?;
            fs::write(path, serialized).map_err(|e| {
                error!("Failed to write credential file {}: {}", path.display(), e);
                Error::CredentialWrite
            })?;
        }
    }

    Ok(Some(creds))
}
