//! Construction of the Google authorization (consent screen) URL.
//!
//! The frontend asks this service for the URL, opens it, and Google sends
//! the user back to the registered redirect URI with an authorization code.
//!
//! # Key Structures
//!
//! ## `AuthCodeRequest`
//! A structure used to generate the authorization request URL.
//! - Includes the client id, redirect URI, scope and access type taken from
//!   the process configuration.
//!
//! ## `AdditionalScope`
//! Optional scopes added on top of the always-present `openid` scope.
//!
//! # Example
//! ```rust,no_run
//! use google_login_bridge::auth_url::{AdditionalScope, AuthCodeRequest};
//! use google_login_bridge::config::Config;
//!
//! let config = Config::builder()
//!     .client_id("your_client_id")
//!     .redirect_uri("your_redirect_uri")
//!     .build();
//!
//! let scope = Some([AdditionalScope::Profile, AdditionalScope::Email].into_iter());
//! let url = AuthCodeRequest::new(true, &config, scope).into_url();
//! println!("Auth URL: {}", url);
//! ```
use itertools::Itertools;

use crate::config::{AuthEndPoint, ClientID, Config, RedirectURI};
use std::{collections::HashSet, iter::Iterator};

/// Optional scope parameters.
///
/// The `openid` scope is always requested; these variants extend it.
///
/// ## `Email`
/// - Requests the user's **email address** and verification status.
///
/// ## `Profile`
/// - Requests the user's **name, profile picture URL and other basic
///   profile information**.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalScope {
    Email,
    Profile,
}

/// Generates a URL to initiate the authorization request.
///
/// Pure function of the configuration: two requests built from the same
/// `Config` produce the same URL.
#[derive(Debug, Clone)]
pub struct AuthCodeRequest<S>
where
    S: Iterator<Item = AdditionalScope>,
{
    auth_endpoint: AuthEndPoint,
    client_id: ClientID,
    response_type: String,
    redirect_uri: RedirectURI,
    scope: Option<S>,
    access_type: bool,
}

impl<S> AuthCodeRequest<S>
where
    S: Iterator<Item = AdditionalScope> + Clone,
{
    /// # **Parameters**
    ///
    /// - `access_type` (`bool`):
    ///   - `true` → Requests an **offline** access token (includes a refresh token).
    ///   - `false` → Requests an **online** access token (no refresh token).
    ///
    /// - `config` (`&Config`):
    ///   - Supplies `client_id`, `auth_endpoint` and `redirect_uri`.
    ///
    /// - `scope` (`Option<S>` where `S: Iterator<Item = AdditionalScope>`):
    ///   - Additional scopes on top of the required `openid` scope.
    ///   - If `None`, only `openid` will be requested.
    pub fn new(access_type: bool, config: &Config, scope: Option<S>) -> Self {
        Self {
            auth_endpoint: config.auth_endpoint.to_owned(),
            client_id: config.client_id.to_owned(),
            response_type: "code".to_string(),
            redirect_uri: config.redirect_uri.to_owned(),
            scope,
            access_type,
        }
    }

    /// Constructs a URL with the required parameters for Google authentication.
    pub fn into_url(&self) -> String {
        let access_type = if self.access_type {
            "offline"
        } else {
            "online"
        };

        let scope = self
            .scope
            .as_ref()
            .map(|s| {
                s.clone().map(|v| match v {
                    AdditionalScope::Email => "email",
                    AdditionalScope::Profile => "profile",
                })
            })
            .map(|v| v.collect::<HashSet<_>>().iter().sorted().join(" "));

        let scope = if let Some(mut v) = scope {
            v.insert_str(0, "openid ");
            v
        } else {
            "openid".to_string()
        };

        format!(
            "{}?response_type={}&client_id={}&redirect_uri={}&scope={}&access_type={}",
            self.auth_endpoint.0,
            self.response_type,
            self.client_id.0,
            self.redirect_uri.0,
            scope,
            access_type,
        )
    }
}
